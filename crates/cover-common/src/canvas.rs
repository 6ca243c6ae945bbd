//! Cover canvas dimensions.

use serde::{Deserialize, Serialize};

/// Recommended cover width in pixels.
pub const COVER_WIDTH: u32 = 1500;

/// Recommended cover height in pixels.
pub const COVER_HEIGHT: u32 = 300;

/// Pixel dimensions of a rendered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The fixed cover size every endpoint renders at.
    pub const fn cover() -> Self {
        Self::new(COVER_WIDTH, COVER_HEIGHT)
    }

    /// Number of bytes in an RGBA buffer of this size.
    pub fn rgba_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::cover()
    }
}

impl std::fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
