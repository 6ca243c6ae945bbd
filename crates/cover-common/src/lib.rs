//! Common types and utilities shared across the cover service crates.

pub mod canvas;
pub mod color;
pub mod error;

pub use canvas::{CanvasSize, COVER_HEIGHT, COVER_WIDTH};
pub use color::{check_color, parse_color, CoverColor, Rgb};
pub use error::{CoverError, CoverResult};
