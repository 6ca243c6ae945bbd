//! Shared test utilities for the cover-service workspace.
//!
//! Font discovery and the `require_font!` skip macro, PNG inspection, pixel
//! buffer generators and color/FEN fixtures. Pulled in as a path
//! dev-dependency by each crate's tests.

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro to skip a test if no usable TrueType font is installed.
///
/// Text covers need a font file on disk. CI images without fonts skip
/// these tests instead of failing.
///
/// # Usage
///
/// ```ignore
/// use test_utils::require_font;
///
/// #[test]
/// fn test_text_cover() {
///     let font_path = require_font!();
///     // Test code using font_path...
/// }
/// ```
#[macro_export]
macro_rules! require_font {
    () => {{
        match $crate::find_font() {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: No TrueType font found. Install DejaVu Sans or set COVER_TEST_FONT."
                );
                return;
            }
        }
    }};
}

/// Skip a test when no color emoji font is installed.
///
/// Evaluates to the font path.
#[macro_export]
macro_rules! require_emoji_font {
    () => {{
        match $crate::find_emoji_font() {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: No color emoji font found. Install Noto Color Emoji or set COVER_TEST_EMOJI_FONT."
                );
                return;
            }
        }
    }};
}

/// Assert two numbers differ by no more than `tolerance`.
///
/// Operands are widened to `f64`, so integer channels and floats mix freely.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(127u8, 128u8, 1);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let (actual, expected, tolerance) = ($actual as f64, $expected as f64, $tolerance as f64);
        assert!(
            (actual - expected).abs() <= tolerance,
            "assertion failed: {} is not within {} of {}",
            actual,
            tolerance,
            expected
        );
    }};
}

/// Assert two RGBA pixels match channel by channel within a tolerance.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_pixel_approx_eq;
///
/// assert_pixel_approx_eq!([127, 0, 0, 255], [128, 0, 0, 255], 1);
/// ```
#[macro_export]
macro_rules! assert_pixel_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left: [u8; 4] = $left;
        let right: [u8; 4] = $right;
        for channel in 0..4 {
            $crate::assert_approx_eq!(left[channel], right[channel], $tolerance);
        }
    }};
}
