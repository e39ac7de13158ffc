//! Grid coverage statistics

use crate::{Layout, OccupancyMap};
use serde::{Deserialize, Serialize};

/// Coverage summary for a layout within its bounding height, which is capped
/// at [`MAX_GRID_ROWS`](crate::MAX_GRID_ROWS)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStats {
    pub grid_width: u32,
    pub grid_height: u32,
    pub total_cells: usize,
    pub occupied_cells: usize,
    pub blank_cells: usize,
    /// Uncovered cells as `(x, y)`, row-major
    pub blank_positions: Vec<(u32, u32)>,
    /// Covered share of the grid in percent; an empty grid counts as full
    pub fill_percentage: f64,
}

impl GridStats {
    pub fn is_gap_free(&self) -> bool {
        self.blank_cells == 0
    }
}

/// Compute coverage statistics for `layout` on a grid `grid_width` columns wide
pub fn grid_stats(layout: &Layout, grid_width: u32) -> GridStats {
    let occupancy = OccupancyMap::from_layout(layout, grid_width);
    let total_cells = occupancy.total_cells();
    let blank_positions: Vec<(u32, u32)> = occupancy.empty_cells().collect();
    let blank_cells = blank_positions.len();
    let occupied_cells = total_cells - blank_cells;
    let fill_percentage = if total_cells == 0 {
        100.0
    } else {
        occupied_cells as f64 / total_cells as f64 * 100.0
    };

    GridStats {
        grid_width,
        grid_height: occupancy.height(),
        total_cells,
        occupied_cells,
        blank_cells,
        blank_positions,
        fill_percentage,
    }
}
