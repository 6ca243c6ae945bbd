//! Centered text covers drawn with a TrueType font.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::{Font, Scale};

use cover_common::{CanvasSize, CoverError, CoverResult, Rgb};

/// Configuration for text rendering
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Preferred font size in pixels
    pub font_size: f32,
    /// Smallest font size tried before giving up on fitting the text
    pub min_font_size: f32,
    /// Horizontal and vertical margin kept free around the text
    pub margin: u32,
    pub color: Rgb,
    pub background: Rgb,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_size: 96.0,
            min_font_size: 12.0,
            margin: 40,
            color: Rgb::new(0, 0, 0),
            background: Rgb::new(255, 255, 255),
        }
    }
}

/// Load a TrueType/OpenType font from disk.
pub fn load_font(path: impl AsRef<Path>) -> CoverResult<Font<'static>> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .map_err(|e| CoverError::FontError(format!("cannot read {}: {}", path.display(), e)))?;
    Font::try_from_vec(data)
        .ok_or_else(|| CoverError::FontError(format!("{} is not a usable font", path.display())))
}

/// Largest font size (stepping down by 10%) at which `text` fits the box.
pub fn fit_font_size(
    font: &Font<'_>,
    text: &str,
    max_width: i32,
    max_height: i32,
    config: &TextConfig,
) -> f32 {
    let mut size = config.font_size;
    while size > config.min_font_size {
        let (w, h) = text_size(Scale::uniform(size), font, text);
        if w <= max_width && h <= max_height {
            return size;
        }
        size *= 0.9;
    }
    config.min_font_size
}

/// Render `text` centered on a canvas filled with the background color.
pub fn render_text(
    text: &str,
    font: &Font<'_>,
    size: CanvasSize,
    config: &TextConfig,
) -> CoverResult<RgbaImage> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CoverError::invalid("text", "text must not be empty"));
    }

    let mut img: RgbaImage =
        ImageBuffer::from_pixel(size.width, size.height, Rgba(config.background.to_rgba()));

    let max_width = size.width.saturating_sub(2 * config.margin) as i32;
    let max_height = size.height.saturating_sub(2 * config.margin) as i32;
    let font_size = fit_font_size(font, text, max_width, max_height, config);
    let scale = Scale::uniform(font_size);

    let (w, h) = text_size(scale, font, text);
    let x = (size.width as i32 - w) / 2;
    let y = (size.height as i32 - h) / 2;

    tracing::debug!(font_size, x, y, w, h, "Drawing text cover");
    draw_text_mut(&mut img, Rgba(config.color.to_rgba()), x, y, scale, font, text);

    Ok(img)
}
