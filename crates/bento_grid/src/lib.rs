//! Bento Grid - Tile packing and gap repair for image galleries
//!
//! This crate places rectangular tiles of varying size into a grid with a
//! fixed column count and unbounded height, then grows tiles into any
//! remaining empty cells so the arrangement has no visible holes.

mod config;
mod error;
mod generator;
mod layout;
mod occupancy;
mod repair;
mod stats;
mod tile;

pub use config::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use occupancy::*;
pub use repair::*;
pub use stats::*;
pub use tile::*;
