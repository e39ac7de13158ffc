//! Gallery - Layout session for an image gallery
//!
//! Keeps the list of uploaded images together with their bento layout and
//! decides how the layout changes when images are added, removed, or
//! shuffled, or when the grid renderer reports a drag or resize.

mod error;
mod image;
mod policy;
mod session;
mod settings;
mod sizing;

pub use error::*;
pub use image::*;
pub use policy::*;
pub use session::*;
pub use settings::*;
pub use sizing::*;
