//! Gap repair
//!
//! Greedily grows tiles into empty cells until the layout's bounding height
//! is fully covered. Each pass finds the first gap (row-major) that has a
//! neighbour able to grow into it, grows that neighbour by one cell and
//! starts over. Tiles never move and are never added or removed.
//!
//! The pass does not backtrack, so some gaps can be unreachable: a gap whose
//! left neighbour is blocked further down and that has no tile directly above
//! it stays open. Those are reported rather than treated as errors.
//!
//! Layouts reaching below [`MAX_GRID_ROWS`] (only possible when reported by a
//! renderer) are returned unchanged.

use crate::{Layout, OccupancyMap, Tile, MAX_GRID_ROWS, MAX_REPAIR_ITERATIONS};
use serde::{Deserialize, Serialize};

/// Which edge of a tile grows during an expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpandDirection {
    /// `w += 1`
    Right,
    /// `h += 1`
    Down,
}

/// How a repair pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepairStatus {
    /// No empty cell remains
    Complete,
    /// Gaps remain but none has a neighbour that can grow into it
    Stalled,
    /// The iteration budget ran out with gaps remaining
    IterationLimit,
    /// The layout reaches below the tracked rows and was left as is
    Oversized,
}

/// Result of a repair pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    /// The repaired layout
    pub layout: Layout,
    /// Empty cells left within the layout's tracked height
    pub residual_gaps: usize,
    /// Number of accepted one-cell expansions
    pub expansions: u32,
    pub status: RepairStatus,
}

impl RepairOutcome {
    pub fn is_complete(&self) -> bool {
        self.status == RepairStatus::Complete
    }
}

/// Repair with the default iteration budget
pub fn repair_gaps(layout: &Layout, grid_width: u32) -> RepairOutcome {
    repair_gaps_with_limit(layout, grid_width, MAX_REPAIR_ITERATIONS)
}

/// Repair with at most `max_iterations` expansions
pub fn repair_gaps_with_limit(
    layout: &Layout,
    grid_width: u32,
    max_iterations: u32,
) -> RepairOutcome {
    let height = layout.height();
    if height > MAX_GRID_ROWS {
        let residual_gaps = OccupancyMap::from_layout(layout, grid_width).empty_count();
        tracing::warn!(
            height,
            max_rows = MAX_GRID_ROWS,
            residual_gaps,
            "Layout is taller than the tracked grid, skipping gap repair"
        );
        return RepairOutcome {
            layout: layout.clone(),
            residual_gaps,
            expansions: 0,
            status: RepairStatus::Oversized,
        };
    }

    let mut working = layout.clone();
    let mut expansions = 0;

    let (residual_gaps, status) = loop {
        let occupancy = OccupancyMap::from_layout(&working, grid_width);
        let gaps = occupancy.empty_count();
        if gaps == 0 {
            break (0, RepairStatus::Complete);
        }
        if expansions >= max_iterations {
            break (gaps, RepairStatus::IterationLimit);
        }
        match find_expansion(&working, &occupancy, grid_width) {
            Some((index, direction)) => {
                let tile = &mut working.tiles_mut()[index];
                match direction {
                    ExpandDirection::Right => tile.w += 1,
                    ExpandDirection::Down => tile.h += 1,
                }
                expansions += 1;
            }
            None => break (gaps, RepairStatus::Stalled),
        }
    };

    match status {
        RepairStatus::Complete => tracing::debug!(expansions, "gap repair complete"),
        RepairStatus::Stalled => tracing::warn!(
            residual_gaps,
            expansions,
            "Could not fill all blank spaces, some gaps remain"
        ),
        RepairStatus::IterationLimit => tracing::warn!(
            residual_gaps,
            expansions,
            max_iterations,
            "Gap repair stopped at iteration limit"
        ),
        RepairStatus::Oversized => {}
    }

    RepairOutcome {
        layout: working,
        residual_gaps,
        expansions,
        status,
    }
}

/// First valid expansion for the earliest fillable gap in row-major order
fn find_expansion(
    layout: &Layout,
    occupancy: &OccupancyMap,
    grid_width: u32,
) -> Option<(usize, ExpandDirection)> {
    occupancy.empty_cells().find_map(|(bx, by)| {
        let tiles = layout.tiles();
        let left = tiles
            .iter()
            .position(|t| t.right() == bx && t.spans_row(by))
            .map(|i| (i, ExpandDirection::Right));
        let above = tiles
            .iter()
            .position(|t| t.bottom() == by && t.spans_column(bx))
            .map(|i| (i, ExpandDirection::Down));

        [left, above]
            .into_iter()
            .flatten()
            .find(|&(index, direction)| can_expand(tiles, index, direction, grid_width))
    })
}

/// Whether growing `tiles[index]` by one cell stays in bounds and clear of
/// every other tile
fn can_expand(tiles: &[Tile], index: usize, direction: ExpandDirection, grid_width: u32) -> bool {
    let mut grown = tiles[index].clone();
    match direction {
        ExpandDirection::Right => {
            grown.w = grown.w.saturating_add(1);
            if grown.right() > grid_width {
                return false;
            }
        }
        ExpandDirection::Down => grown.h = grown.h.saturating_add(1),
    }
    tiles
        .iter()
        .enumerate()
        .all(|(i, other)| i == index || !grown.overlaps(other))
}
