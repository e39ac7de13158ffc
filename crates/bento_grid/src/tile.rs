//! Tile geometry
//!
//! A tile is one placed rectangle in grid units. Coordinates are the top-left
//! corner; the occupied region is the half-open box `[x, x+w) × [y, y+h)`.

use serde::{Deserialize, Serialize};

fn default_min() -> u32 {
    1
}

/// One placed rectangle representing a single image
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Stable identifier of the source image
    #[serde(rename = "i", alias = "id")]
    pub id: String,
    /// Column of the top-left corner
    pub x: u32,
    /// Row of the top-left corner
    pub y: u32,
    /// Width in grid columns
    pub w: u32,
    /// Height in grid rows
    pub h: u32,
    /// Smallest width an interactive resize may shrink to
    #[serde(rename = "minW", default = "default_min")]
    pub min_w: u32,
    /// Smallest height an interactive resize may shrink to
    #[serde(rename = "minH", default = "default_min")]
    pub min_h: u32,
}

impl Tile {
    pub fn new(id: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            min_w: 1,
            min_h: 1,
        }
    }

    /// Set the resize floors
    pub fn with_min_size(mut self, min_w: u32, min_h: u32) -> Self {
        self.min_w = min_w;
        self.min_h = min_h;
        self
    }

    /// Exclusive right edge, saturating at `u32::MAX`
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge, saturating at `u32::MAX`
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    pub fn area(&self) -> u64 {
        u64::from(self.w) * u64::from(self.h)
    }

    /// Whether the cell at `(x, y)` lies inside this tile
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether the row `y` falls within this tile's vertical span
    pub fn spans_row(&self, y: u32) -> bool {
        y >= self.y && y < self.bottom()
    }

    /// Whether the column `x` falls within this tile's horizontal span
    pub fn spans_column(&self, x: u32) -> bool {
        x >= self.x && x < self.right()
    }

    /// Whether the two tiles share at least one cell
    pub fn overlaps(&self, other: &Tile) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}
