//! Layout generation
//!
//! Assigns every item a random size within the configured bounds and packs
//! the tiles with a first-fit row scan: starting from the top row, each tile
//! goes to the leftmost column where its whole rectangle is free, moving one
//! row down whenever the current row has no room.

use crate::{GridConfig, GridError, Layout, OccupancyMap, Result, Tile};
use rand::Rng;
use std::collections::HashSet;

/// Draw a tile size uniformly from the configured bounds, width first
pub fn draw_size<R: Rng + ?Sized>(config: &GridConfig, rng: &mut R) -> (u32, u32) {
    let w = rng.gen_range(config.min_w..=config.max_w);
    let h = rng.gen_range(config.min_h..=config.max_h);
    (w, h)
}

/// Place one `w × h` tile at the first free position and mark it occupied.
///
/// Only rows `0..config.max_rows` are used. A tile taller than that, wider
/// than the grid, or finding no free spot above the last row fails to place.
pub fn place_tile(
    occupancy: &mut OccupancyMap,
    id: impl Into<String>,
    w: u32,
    h: u32,
    config: &GridConfig,
) -> Result<Tile> {
    let id = id.into();
    let grid_width = occupancy.width();

    if w == 0 || h == 0 {
        return Err(GridError::EmptyTile(id));
    }
    if w > grid_width || h > config.max_rows {
        return Err(GridError::PlacementFailed {
            id,
            w,
            h,
            rows_scanned: 0,
        });
    }

    let last_row = config.max_rows - h;
    for row in 0..=last_row {
        let free = (0..=grid_width - w).find(|&x| occupancy.is_region_free(x, row, w, h));
        if let Some(x) = free {
            occupancy.mark(x, row, w, h);
            tracing::trace!(id = %id, x, y = row, w, h, "tile placed");
            return Ok(Tile::new(id, x, row, w, h)
                .with_min_size(config.min_w.min(w), config.min_h.min(h)));
        }
    }

    tracing::warn!(id = %id, w, h, max_rows = config.max_rows, "no room left for tile");
    Err(GridError::PlacementFailed {
        id,
        w,
        h,
        rows_scanned: last_row + 1,
    })
}

/// Generate a packed layout with one randomly sized tile per id, in order
pub fn generate_layout<S, R>(ids: &[S], config: &GridConfig, rng: &mut R) -> Result<Layout>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    config.validate()?;

    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id.as_ref()) {
            return Err(GridError::DuplicateId(id.as_ref().to_string()));
        }
    }

    let mut occupancy = OccupancyMap::new(config.grid_width, 0);
    let mut layout = Layout::new();
    for id in ids {
        let (w, h) = draw_size(config, rng);
        let tile = place_tile(&mut occupancy, id.as_ref(), w, h, config)?;
        layout.push(tile);
    }

    tracing::debug!(
        tiles = layout.len(),
        height = layout.height(),
        grid_width = config.grid_width,
        "layout generated"
    );
    Ok(layout)
}

/// Generate `count` tiles named `item-0`, `item-1`, ...
pub fn generate_items<R: Rng + ?Sized>(
    count: usize,
    config: &GridConfig,
    rng: &mut R,
) -> Result<Layout> {
    let ids: Vec<String> = (0..count).map(|i| format!("item-{}", i)).collect();
    generate_layout(&ids, config, rng)
}
