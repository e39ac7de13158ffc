//! Occupancy map
//!
//! A derived boolean grid marking which cells are covered by some tile. It is
//! rebuilt from a layout whenever needed and never stored alongside it.
//!
//! The map never tracks more than [`MAX_GRID_ROWS`] rows. Layouts reported by
//! a renderer may carry arbitrary coordinates, and cells below the cap are
//! dropped instead of being allocated.

use crate::{Layout, Tile, MAX_GRID_ROWS};

/// Row-major cell coverage for a grid of fixed width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMap {
    width: u32,
    height: u32,
    cells: Vec<bool>,
    clipped: bool,
}

impl OccupancyMap {
    /// An empty map of the given size, with the height capped at
    /// [`MAX_GRID_ROWS`]
    pub fn new(width: u32, height: u32) -> Self {
        let height = height.min(MAX_GRID_ROWS);
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
            clipped: false,
        }
    }

    /// Build the map for a layout. The height is the layout's height; cells
    /// of tiles extending past `width` or below the row cap are clipped.
    pub fn from_layout(layout: &Layout, width: u32) -> Self {
        let mut map = Self::new(width, layout.height());
        for tile in layout {
            map.mark_tile(tile);
        }
        map
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether some marked rectangle reached below [`MAX_GRID_ROWS`]
    pub fn is_clipped(&self) -> bool {
        self.clipped
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Whether `(x, y)` is covered. Cells outside the map are reported free.
    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.cells[self.index(x, y)]
    }

    /// Whether every cell of the `w × h` rectangle at `(x, y)` is free.
    ///
    /// Rows below the current height count as free since the map grows
    /// downward on demand; columns past the width never fit.
    pub fn is_region_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        if x.saturating_add(w) > self.width {
            return false;
        }
        let last_row = y.saturating_add(h).min(self.height);
        (y..last_row).all(|row| (x..x + w).all(|col| !self.cells[self.index(col, row)]))
    }

    /// Mark a rectangle as covered, growing the map downward when needed.
    /// Rows at or below [`MAX_GRID_ROWS`] are not tracked.
    pub fn mark(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let full_bottom = y.saturating_add(h);
        if full_bottom > MAX_GRID_ROWS {
            self.clipped = true;
        }
        let bottom = full_bottom.min(MAX_GRID_ROWS);
        if bottom > self.height {
            self.grow_to(bottom);
        }
        let right = x.saturating_add(w).min(self.width);
        for row in y..bottom {
            for col in x..right {
                let idx = self.index(col, row);
                self.cells[idx] = true;
            }
        }
    }

    pub fn mark_tile(&mut self, tile: &Tile) {
        self.mark(tile.x, tile.y, tile.w, tile.h);
    }

    fn grow_to(&mut self, height: u32) {
        self.cells.resize(self.width as usize * height as usize, false);
        self.height = height;
    }

    /// Uncovered cells in row-major order (top to bottom, left to right)
    pub fn empty_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, covered)| !**covered)
            .map(move |(idx, _)| ((idx % width) as u32, (idx / width) as u32))
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| !**c).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.len() - self.empty_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_layout_marks_tiles() {
        let layout = Layout::from_tiles(vec![
            Tile::new("a", 0, 0, 2, 2),
            Tile::new("b", 3, 1, 1, 1),
        ]);
        let map = OccupancyMap::from_layout(&layout, 4);
        assert_eq!(map.height(), 2);
        assert_eq!(map.total_cells(), 8);
        assert_eq!(map.occupied_count(), 5);
        assert!(map.is_occupied(1, 1));
        assert!(!map.is_occupied(2, 0));
        assert!(map.is_occupied(3, 1));
    }

    #[test]
    fn test_empty_cells_are_row_major() {
        let layout = Layout::from_tiles(vec![Tile::new("a", 0, 0, 1, 2)]);
        let map = OccupancyMap::from_layout(&layout, 3);
        let empty: Vec<_> = map.empty_cells().collect();
        assert_eq!(empty, vec![(1, 0), (2, 0), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_out_of_range_cells_are_clipped() {
        let layout = Layout::from_tiles(vec![Tile::new("a", 2, 0, 4, 1)]);
        let map = OccupancyMap::from_layout(&layout, 4);
        assert_eq!(map.occupied_count(), 2);
        assert!(!map.is_occupied(10, 0));
    }

    #[test]
    fn test_region_free_below_height() {
        let mut map = OccupancyMap::new(4, 0);
        assert!(map.is_region_free(0, 0, 4, 3));
        map.mark(0, 0, 2, 2);
        assert_eq!(map.height(), 2);
        assert!(!map.is_region_free(1, 1, 2, 2));
        assert!(map.is_region_free(2, 0, 2, 5));
        assert!(map.is_region_free(0, 2, 4, 1));
    }

    #[test]
    fn test_far_tiles_are_clipped_at_row_cap() {
        let layout = Layout::from_tiles(vec![
            Tile::new("a", 0, 0, 2, 1),
            Tile::new("far", 0, u32::MAX, 2, 4),
        ]);
        let map = OccupancyMap::from_layout(&layout, 4);
        assert_eq!(map.height(), MAX_GRID_ROWS);
        assert_eq!(map.total_cells(), 4 * MAX_GRID_ROWS as usize);
        assert_eq!(map.occupied_count(), 2);
        assert!(map.is_clipped());
    }

    #[test]
    fn test_mark_straddling_row_cap_keeps_tracked_rows() {
        let mut map = OccupancyMap::new(2, 0);
        map.mark(0, MAX_GRID_ROWS - 1, 2, 3);
        assert_eq!(map.height(), MAX_GRID_ROWS);
        assert!(map.is_occupied(1, MAX_GRID_ROWS - 1));
        assert_eq!(map.occupied_count(), 2);
        assert!(map.is_clipped());
        assert!(!OccupancyMap::new(2, u32::MAX).is_clipped());
    }

    #[test]
    fn test_region_past_width_never_fits() {
        let map = OccupancyMap::new(4, 4);
        assert!(!map.is_region_free(2, 0, 3, 1));
    }
}
