//! Layout: the complete set of tiles for the current item collection

use crate::{GridError, Result, Tile};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered collection of tiles keyed by id
///
/// Only geometry matters for correctness. Order is kept because it decides
/// tie-breaks when the repair pass looks for a tile to expand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    tiles: Vec<Tile>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles
    }

    pub(crate) fn push(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Look up a tile by id
    pub fn get(&self, id: &str) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Tile ids in layout order
    pub fn ids(&self) -> Vec<&str> {
        self.tiles.iter().map(|t| t.id.as_str()).collect()
    }

    /// Number of rows covered, i.e. the largest `y + h` (0 when empty)
    pub fn height(&self) -> u32 {
        self.tiles.iter().map(Tile::bottom).max().unwrap_or(0)
    }

    /// Sum of tile areas. Equals the covered cell count when nothing overlaps.
    pub fn occupied_area(&self) -> u64 {
        self.tiles
            .iter()
            .map(Tile::area)
            .fold(0, u64::saturating_add)
    }

    /// A copy of this layout without the tiles whose ids are listed.
    /// Survivors keep their geometry and relative order.
    pub fn without<S: AsRef<str>>(&self, ids: &[S]) -> Layout {
        let removed: HashSet<&str> = ids.iter().map(AsRef::as_ref).collect();
        Layout {
            tiles: self
                .tiles
                .iter()
                .filter(|t| !removed.contains(t.id.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Index pairs of tiles whose rectangles intersect
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.tiles.iter().enumerate() {
            for (j, b) in self.tiles.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// Tiles that extend past the right edge of the grid
    pub fn out_of_bounds(&self, grid_width: u32) -> Vec<&Tile> {
        self.tiles
            .iter()
            .filter(|t| t.right() > grid_width)
            .collect()
    }

    /// Check every layout invariant, returning the first violation found.
    ///
    /// Reported layouts are never validated automatically; hosts that want
    /// the guarantee call this before accepting one.
    pub fn validate(&self, grid_width: u32) -> Result<()> {
        let mut seen = HashSet::new();
        for tile in &self.tiles {
            if !seen.insert(tile.id.as_str()) {
                return Err(GridError::DuplicateId(tile.id.clone()));
            }
            if tile.w == 0 || tile.h == 0 {
                return Err(GridError::EmptyTile(tile.id.clone()));
            }
            if tile.right() > grid_width {
                return Err(GridError::OutOfBounds {
                    id: tile.id.clone(),
                    right: tile.right(),
                    grid_width,
                });
            }
        }
        if let Some(&(i, j)) = self.overlapping_pairs().first() {
            return Err(GridError::Overlap {
                first: self.tiles[i].id.clone(),
                second: self.tiles[j].id.clone(),
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FromIterator<Tile> for Layout {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        Self {
            tiles: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Layout {
    type Item = Tile;
    type IntoIter = std::vec::IntoIter<Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.into_iter()
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
