//! Image metadata handed over by the upload widget

use serde::{Deserialize, Serialize};

/// A decoded image as far as layout is concerned
///
/// Only `id` and the natural dimensions influence placement. The remaining
/// fields are carried for the page and never inspected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMeta {
    pub id: String,
    /// Natural width in pixels (0 when unknown)
    #[serde(default)]
    pub width: u32,
    /// Natural height in pixels (0 when unknown)
    #[serde(default)]
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl ImageMeta {
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            name: None,
            mime_type: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Width over height, or `None` when either dimension is unknown
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(f64::from(self.width) / f64::from(self.height))
        }
    }
}
