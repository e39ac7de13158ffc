//! Error types for grid generation and validation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Invalid grid configuration: {0}")]
    InvalidConfig(String),

    #[error("No space for tile '{id}' ({w}x{h}) after scanning {rows_scanned} rows")]
    PlacementFailed {
        id: String,
        w: u32,
        h: u32,
        rows_scanned: u32,
    },

    #[error("Duplicate tile id: {0}")]
    DuplicateId(String),

    #[error("Tiles '{first}' and '{second}' overlap")]
    Overlap { first: String, second: String },

    #[error("Tile '{id}' extends to column {right}, past grid width {grid_width}")]
    OutOfBounds {
        id: String,
        right: u32,
        grid_width: u32,
    },

    #[error("Tile '{0}' has zero width or height")]
    EmptyTile(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
