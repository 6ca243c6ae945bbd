//! Path utilities for locating fonts and temporary test directories.

use std::path::PathBuf;

/// Font files tried when `COVER_TEST_FONT` is not set.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Color emoji fonts tried when `COVER_TEST_EMOJI_FONT` is not set.
const EMOJI_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
    "/usr/share/fonts/noto/NotoColorEmoji.ttf",
    "/usr/share/fonts/google-noto-emoji/NotoColorEmoji.ttf",
    "/usr/share/fonts/noto-emoji/NotoColorEmoji.ttf",
    "/usr/share/fonts/truetype/twemoji/TwitterColorEmoji-SVGinOT.ttf",
    "/System/Library/Fonts/Apple Color Emoji.ttc",
    "C:\\Windows\\Fonts\\seguiemj.ttf",
];

/// Locate a TrueType font for text rendering tests.
///
/// Checks, in order:
/// 1. Environment variable `COVER_TEST_FONT` (if set)
/// 2. `COVER_FONT_PATH`, the variable the service itself reads
/// 3. Well-known system locations for DejaVu Sans and common fallbacks
pub fn find_font() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    for var in ["COVER_TEST_FONT", "COVER_FONT_PATH"] {
        if let Ok(path) = std::env::var(var) {
            candidates.push(PathBuf::from(path));
        }
    }
    candidates.extend(FONT_CANDIDATES.iter().map(PathBuf::from));

    candidates.into_iter().find(|path| path.is_file())
}

/// Locate a color emoji font, checking `COVER_TEST_EMOJI_FONT` first.
pub fn find_emoji_font() -> Option<PathBuf> {
    std::env::var("COVER_TEST_EMOJI_FONT")
        .ok()
        .map(PathBuf::from)
        .into_iter()
        .chain(EMOJI_FONT_CANDIDATES.iter().map(PathBuf::from))
        .find(|path| path.is_file())
}

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Creates a temporary directory with a specific prefix.
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}
