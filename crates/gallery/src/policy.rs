//! Layout mutation policy knobs

use serde::{Deserialize, Serialize};

/// What happens to the holes left behind when images are removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RemovalPolicy {
    /// Drop the tiles and leave the gaps visible
    #[default]
    LeaveGaps,
    /// Run the repair pass after dropping the tiles
    Repair,
}

/// Per-call choice for incremental insertion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GapFill {
    #[default]
    Leave,
    Repair,
}

/// How tiles for newly inserted images are sized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SizeStrategy {
    /// Uniform draw from the configured width and height bounds
    #[default]
    Random,
    /// Default width, height following the image's aspect ratio
    AspectRatio,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryPolicy {
    pub removal: RemovalPolicy,
    pub sizing: SizeStrategy,
}

impl GalleryPolicy {
    pub fn with_removal(mut self, removal: RemovalPolicy) -> Self {
        self.removal = removal;
        self
    }

    pub fn with_sizing(mut self, sizing: SizeStrategy) -> Self {
        self.sizing = sizing;
        self
    }
}
