//! Error types for gallery layout changes

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("Grid error: {0}")]
    Grid(#[from] bento_grid::GridError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
