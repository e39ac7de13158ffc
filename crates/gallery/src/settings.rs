//! Persisted gallery settings
//!
//! Grid configuration and mutation policy stored together as one JSON file.
//! A missing file yields defaults; a malformed or invalid one is logged and
//! replaced with defaults.

use crate::{GalleryPolicy, Result};
use bento_grid::GridConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GallerySettings {
    pub grid: GridConfig,
    pub policy: GalleryPolicy,
}

impl GallerySettings {
    /// Load from a JSON file, falling back to defaults when the file is
    /// missing or does not hold usable settings
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<GallerySettings>(&content) {
            Ok(settings) => match settings.grid.validate() {
                Ok(()) => Ok(settings),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        "Invalid grid settings, using defaults: {}",
                        e
                    );
                    Ok(Self::default())
                }
            },
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    "Failed to parse gallery settings, using defaults: {}",
                    e
                );
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RemovalPolicy, SizeStrategy};

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = GallerySettings::load(&dir.path().join("gallery.json")).unwrap();
        assert_eq!(settings, GallerySettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("gallery.json");
        let settings = GallerySettings {
            grid: GridConfig::default()
                .with_grid_width(12)
                .with_width_range(2, 4)
                .with_height_range(2, 6),
            policy: GalleryPolicy::default()
                .with_removal(RemovalPolicy::Repair)
                .with_sizing(SizeStrategy::AspectRatio),
        };
        settings.save(&path).unwrap();
        assert_eq!(GallerySettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        std::fs::write(&path, r#"{"policy":{"removal":"repair"}}"#).unwrap();
        let settings = GallerySettings::load(&path).unwrap();
        assert_eq!(settings.policy.removal, RemovalPolicy::Repair);
        assert_eq!(settings.grid, GridConfig::default());
    }

    #[test]
    fn test_load_malformed_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(GallerySettings::load(&path).unwrap(), GallerySettings::default());
    }

    #[test]
    fn test_load_invalid_grid_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        std::fs::write(&path, r#"{"grid":{"gridWidth":4}}"#).unwrap();
        assert_eq!(GallerySettings::load(&path).unwrap(), GallerySettings::default());
    }
}
