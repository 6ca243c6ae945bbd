//! PNG encoding for rendered covers.
//!
//! Two encodings are produced:
//! - **Indexed PNG (color type 3)** when the image has ≤256 unique colors.
//!   Solid fills and most chess boards land here and encode to a few KB.
//! - **RGBA PNG (color type 6)** otherwise (gradients, anti-aliased glyphs).
//!
//! `encode_cover` is the entry point used by the service; it picks the
//! encoding automatically.

use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::io::Write;

use cover_common::{CanvasSize, CoverError, CoverResult};

/// PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Palette entries available to a color type 3 image.
const MAX_PALETTE_SIZE: usize = 256;

/// Images with at least this many pixels are scanned on the rayon pool.
const PARALLEL_THRESHOLD: usize = 4096;

/// Encode an RGBA buffer of the given size, choosing indexed or RGBA output.
pub fn encode_cover(pixels: &[u8], size: CanvasSize) -> CoverResult<Vec<u8>> {
    if pixels.len() != size.rgba_len() {
        return Err(CoverError::EncodeError(format!(
            "buffer holds {} bytes, expected {} for {}",
            pixels.len(),
            size.rgba_len(),
            size
        )));
    }
    create_png_auto(pixels, size.width as usize, size.height as usize)
}

/// Indexed encoding when the image fits a palette, RGBA otherwise.
pub fn create_png_auto(pixels: &[u8], width: usize, height: usize) -> CoverResult<Vec<u8>> {
    match Palette::extract(pixels) {
        Some(palette) => {
            let indices = palette.index_pixels(pixels);
            create_png_indexed(width, height, &palette.entries(), &indices)
        }
        None => create_png(pixels, width, height),
    }
}

/// Distinct RGBA colors of an image in first-seen order.
struct Palette {
    colors: Vec<[u8; 4]>,
    lookup: HashMap<[u8; 4], u8>,
}

impl Palette {
    /// `None` when the image has more than 256 distinct colors.
    fn extract(pixels: &[u8]) -> Option<Self> {
        let colors = if pixels.len() / 4 >= PARALLEL_THRESHOLD {
            distinct_colors_parallel(pixels)?
        } else {
            distinct_colors(pixels)?
        };
        let lookup = colors
            .iter()
            .enumerate()
            .map(|(i, c)| (*c, i as u8))
            .collect();
        Some(Self { colors, lookup })
    }

    fn index_of(&self, px: &[u8]) -> u8 {
        self.lookup
            .get(&[px[0], px[1], px[2], px[3]])
            .copied()
            .unwrap_or_default()
    }

    fn index_pixels(&self, pixels: &[u8]) -> Vec<u8> {
        if pixels.len() / 4 >= PARALLEL_THRESHOLD {
            pixels.par_chunks_exact(4).map(|px| self.index_of(px)).collect()
        } else {
            pixels.chunks_exact(4).map(|px| self.index_of(px)).collect()
        }
    }

    fn entries(&self) -> Vec<(u8, u8, u8, u8)> {
        self.colors.iter().map(|c| (c[0], c[1], c[2], c[3])).collect()
    }
}

fn distinct_colors(pixels: &[u8]) -> Option<Vec<[u8; 4]>> {
    let mut seen = HashSet::with_capacity(MAX_PALETTE_SIZE);
    let mut colors = Vec::new();
    for px in pixels.chunks_exact(4) {
        let color = [px[0], px[1], px[2], px[3]];
        if seen.insert(color) {
            if colors.len() == MAX_PALETTE_SIZE {
                return None;
            }
            colors.push(color);
        }
    }
    Some(colors)
}

/// Bands of pixels are scanned independently, then merged in band order so
/// the palette is identical to the sequential scan.
fn distinct_colors_parallel(pixels: &[u8]) -> Option<Vec<[u8; 4]>> {
    let band = (pixels.len() / 4 / rayon::current_num_threads()).max(256) * 4;
    let bands: Vec<Vec<[u8; 4]>> = pixels
        .par_chunks(band)
        .map(distinct_colors)
        .collect::<Option<_>>()?;

    let mut seen = HashSet::with_capacity(MAX_PALETTE_SIZE);
    let mut colors = Vec::new();
    for color in bands.into_iter().flatten() {
        if seen.insert(color) {
            if colors.len() == MAX_PALETTE_SIZE {
                return None;
            }
            colors.push(color);
        }
    }
    Some(colors)
}

/// Create an indexed PNG (color type 3) from palette and indices.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[(u8, u8, u8, u8)],
    indices: &[u8],
) -> CoverResult<Vec<u8>> {
    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let mut plte_data = Vec::with_capacity(palette.len() * 3);
    for (r, g, b, _) in palette {
        plte_data.extend_from_slice(&[*r, *g, *b]);
    }
    write_chunk(&mut png, b"PLTE", &plte_data);

    // tRNS only when some palette entry is not fully opaque
    if palette.iter().any(|(_, _, _, a)| *a < 255) {
        let trns_data: Vec<u8> = palette.iter().map(|(_, _, _, a)| *a).collect();
        write_chunk(&mut png, b"tRNS", &trns_data);
    }

    let idat_data = deflate_scanlines(indices, width, height, 1)?;
    write_chunk(&mut png, b"IDAT", &idat_data);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Create a PNG image from RGBA pixel data (color type 6).
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> CoverResult<Vec<u8>> {
    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6));

    let idat_data = deflate_scanlines(pixels, width, height, 4)?;
    write_chunk(&mut png, b"IDAT", &idat_data);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

fn ihdr(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&(width as u32).to_be_bytes());
    data.extend_from_slice(&(height as u32).to_be_bytes());
    data.push(8); // bit depth
    data.push(color_type);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    data
}

/// Write a PNG chunk: length, type, data, CRC over type + data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix each scanline with filter byte 0 and zlib-compress the result.
fn deflate_scanlines(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> CoverResult<Vec<u8>> {
    let stride = width * bytes_per_pixel;
    if data.len() < stride * height {
        return Err(CoverError::EncodeError(format!(
            "scanline data too short: {} < {}",
            data.len(),
            stride * height
        )));
    }

    let mut uncompressed = Vec::with_capacity(height * (1 + stride));
    for row in data.chunks_exact(stride).take(height) {
        uncompressed.push(0); // filter type: none
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&uncompressed)
        .map_err(|e| CoverError::EncodeError(format!("IDAT compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| CoverError::EncodeError(format!("IDAT compression failed: {}", e)))
}
