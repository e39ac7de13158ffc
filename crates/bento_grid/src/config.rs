//! Grid configuration
//!
//! Column count, tile size bounds, and the ceilings that keep the generator,
//! the occupancy map and the repair pass bounded. Parsed from JSON with
//! missing fields filled from defaults; reading and writing the file is left
//! to the host.

use crate::{GridError, Result};
use serde::{Deserialize, Serialize};

/// Number of columns in the reference gallery grid
pub const GRID_WIDTH: u32 = 32;

/// Rows an occupancy map will ever track. Generated layouts never reach
/// past it, and reported layouts that do are clipped.
pub const MAX_GRID_ROWS: u32 = 4096;

/// Expansion steps the repair pass may take before stopping. Reaching it is
/// reported as a partial fill, not an error.
pub const MAX_REPAIR_ITERATIONS: u32 = 1000;

/// Pixel measurements of the rendered grid, used to turn an image's aspect
/// ratio into a row count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PixelMetrics {
    /// Assumed container width in pixels
    pub container_width_px: f32,
    /// Height of one grid row in pixels
    pub row_height_px: f32,
    /// Vertical gap between rows in pixels
    pub margin_px: f32,
}

impl Default for PixelMetrics {
    fn default() -> Self {
        Self {
            container_width_px: 1200.0,
            row_height_px: 30.0,
            margin_px: 10.0,
        }
    }
}

/// Configuration for tile generation and repair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Number of columns
    pub grid_width: u32,
    pub min_w: u32,
    pub max_w: u32,
    pub min_h: u32,
    pub max_h: u32,
    /// Width given to tiles sized from an aspect ratio
    pub default_w: u32,
    /// Tallest tile an aspect ratio may produce
    pub max_aspect_h: u32,
    /// Rows the generator may use. A tile that fits nowhere above this
    /// row fails to place.
    pub max_rows: u32,
    pub max_repair_iterations: u32,
    pub pixels: PixelMetrics,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            min_w: 10,
            max_w: 12,
            min_h: 4,
            max_h: 8,
            default_w: 10,
            max_aspect_h: 24,
            max_rows: MAX_GRID_ROWS,
            max_repair_iterations: MAX_REPAIR_ITERATIONS,
            pixels: PixelMetrics::default(),
        }
    }
}

impl GridConfig {
    /// Change the column count, keeping the size bounds
    pub fn with_grid_width(mut self, grid_width: u32) -> Self {
        self.grid_width = grid_width;
        self
    }

    pub fn with_width_range(mut self, min_w: u32, max_w: u32) -> Self {
        self.min_w = min_w;
        self.max_w = max_w;
        self
    }

    pub fn with_height_range(mut self, min_h: u32, max_h: u32) -> Self {
        self.min_h = min_h;
        self.max_h = max_h;
        self
    }

    pub fn with_default_width(mut self, default_w: u32) -> Self {
        self.default_w = default_w;
        self
    }

    pub fn with_max_aspect_height(mut self, max_aspect_h: u32) -> Self {
        self.max_aspect_h = max_aspect_h;
        self
    }

    pub fn with_max_rows(mut self, max_rows: u32) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_max_repair_iterations(mut self, max_repair_iterations: u32) -> Self {
        self.max_repair_iterations = max_repair_iterations;
        self
    }

    pub fn with_pixels(mut self, pixels: PixelMetrics) -> Self {
        self.pixels = pixels;
        self
    }

    /// Reject bounds under which no tile could ever be placed
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 {
            return Err(GridError::InvalidConfig("grid width must be positive".into()));
        }
        if self.min_w == 0 || self.min_h == 0 {
            return Err(GridError::InvalidConfig(format!(
                "minimum tile size must be positive, got {}x{}",
                self.min_w, self.min_h
            )));
        }
        if self.min_w > self.max_w {
            return Err(GridError::InvalidConfig(format!(
                "min width {} exceeds max width {}",
                self.min_w, self.max_w
            )));
        }
        if self.min_h > self.max_h {
            return Err(GridError::InvalidConfig(format!(
                "min height {} exceeds max height {}",
                self.min_h, self.max_h
            )));
        }
        if self.max_w > self.grid_width {
            return Err(GridError::InvalidConfig(format!(
                "max width {} exceeds grid width {}",
                self.max_w, self.grid_width
            )));
        }
        if self.max_aspect_h < self.min_h {
            return Err(GridError::InvalidConfig(format!(
                "aspect height cap {} is below min height {}",
                self.max_aspect_h, self.min_h
            )));
        }
        if self.max_rows == 0 || self.max_rows > MAX_GRID_ROWS {
            return Err(GridError::InvalidConfig(format!(
                "row limit {} must be between 1 and {}",
                self.max_rows, MAX_GRID_ROWS
            )));
        }
        if self.max_h > self.max_rows || self.max_aspect_h > self.max_rows {
            return Err(GridError::InvalidConfig(format!(
                "tile heights up to {} do not fit in {} rows",
                self.max_h.max(self.max_aspect_h),
                self.max_rows
            )));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
