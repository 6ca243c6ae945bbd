//! Solid and two-stop gradient fills.

use rayon::prelude::*;

use cover_common::{CanvasSize, Rgb};

/// Fill a canvas with a single color.
///
/// # Returns
/// RGBA pixel data (4 bytes per pixel)
pub fn render_solid(color: Rgb, size: CanvasSize) -> Vec<u8> {
    let rgba = color.to_rgba();
    let mut pixels = Vec::with_capacity(size.rgba_len());
    for _ in 0..(size.width as usize * size.height as usize) {
        pixels.extend_from_slice(&rgba);
    }
    pixels
}

/// Mask value for row `y`: 0 at the top, approaching 255 at the bottom.
#[inline]
pub fn gradient_mask(y: u32, height: u32) -> u8 {
    if height == 0 {
        return 0;
    }
    ((255 * y as u64) / height as u64).min(255) as u8
}

/// Blend two colors with an 8-bit mask (0 = all `top`, 255 = all `bottom`).
#[inline]
pub fn blend(top: Rgb, bottom: Rgb, mask: u8) -> Rgb {
    let m = mask as u32;
    let inv = 255 - m;
    let mix = |a: u8, b: u8| ((a as u32 * inv + b as u32 * m + 127) / 255) as u8;
    Rgb::new(mix(top.r, bottom.r), mix(top.g, bottom.g), mix(top.b, bottom.b))
}

/// Render a vertical gradient from `top` (first row) toward `bottom`.
///
/// Each row is a single color, so rows are filled in parallel.
///
/// # Returns
/// RGBA pixel data (4 bytes per pixel)
pub fn render_gradient(top: Rgb, bottom: Rgb, size: CanvasSize) -> Vec<u8> {
    let row_bytes = size.width as usize * 4;
    let mut pixels = vec![0u8; size.rgba_len()];
    if row_bytes == 0 {
        return pixels;
    }

    pixels
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            let rgba = blend(top, bottom, gradient_mask(y as u32, size.height)).to_rgba();
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        });

    pixels
}
