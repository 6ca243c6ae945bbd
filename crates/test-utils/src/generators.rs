//! Pixel buffer generators for encoder and rendering tests.

/// Creates a buffer filled with a single RGBA color.
pub fn create_solid_pixels(width: usize, height: usize, rgba: [u8; 4]) -> Vec<u8> {
    rgba.repeat(width * height)
}

/// Creates RGBA pixel data with a smooth two-axis gradient.
///
/// Produces far more than 256 unique colors, so encoders must fall back
/// to RGBA output.
pub fn create_test_rgba_pixels(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let r = ((x as f32 / width as f32) * 255.0) as u8;
            let g = ((y as f32 / height as f32) * 255.0) as u8;
            pixels.extend_from_slice(&[r, g, 128, 255]);
        }
    }
    pixels
}

/// Creates RGBA pixel data using `colors` distinct colors in vertical bands.
pub fn create_banded_pixels(width: usize, height: usize, colors: usize) -> Vec<u8> {
    let colors = colors.max(1);
    let mut pixels = Vec::with_capacity(width * height * 4);
    for _ in 0..height {
        for x in 0..width {
            let band = (x * colors / width.max(1)).min(colors - 1);
            let r = (band % 256) as u8;
            let g = ((band / 256) % 256) as u8;
            pixels.extend_from_slice(&[r, g, 200, 255]);
        }
    }
    pixels
}

/// Count unique RGBA colors in a buffer.
pub fn count_unique_colors(pixels: &[u8]) -> usize {
    let mut unique = std::collections::HashSet::new();
    for px in pixels.chunks_exact(4) {
        unique.insert([px[0], px[1], px[2], px[3]]);
    }
    unique.len()
}

/// RGBA value of the pixel at (x, y).
pub fn pixel_at(pixels: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
    let i = (y * width + x) * 4;
    [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
}
