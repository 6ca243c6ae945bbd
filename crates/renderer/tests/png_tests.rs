//! Tests for PNG encoding of cover images.
//!
//! Covers format selection (indexed vs RGBA), header correctness for the
//! fixed cover size, and the buffer length guard in `encode_cover`.

use cover_common::{CanvasSize, CoverError, Rgb};
use renderer::gradient::{render_gradient, render_solid};
use renderer::png::{create_png, create_png_auto, encode_cover};
use test_utils::{
    count_unique_colors, create_banded_pixels, create_solid_pixels, create_test_rgba_pixels,
    png_chunk_types, png_info,
};

// ============================================================================
// Basic PNG creation tests
// ============================================================================

#[test]
fn test_create_png_simple() {
    // Simple 2x2 image with 2 colors
    let pixels = [
        255, 0, 0, 255, // red
        0, 255, 0, 255, // green
        0, 255, 0, 255, // green
        255, 0, 0, 255, // red
    ];

    let png = create_png_auto(&pixels, 2, 2).unwrap();
    let info = png_info(&png).unwrap();
    assert_eq!((info.width, info.height), (2, 2));
    assert_eq!(info.color_type, 3);
}

#[test]
fn test_create_png_rgba() {
    let pixels = [
        255, 0, 0, 255, // red
        0, 255, 0, 255, // green
        0, 0, 255, 255, // blue
        255, 255, 0, 255, // yellow
    ];

    let png = create_png(&pixels, 2, 2).unwrap();
    let info = png_info(&png).unwrap();
    assert_eq!(info.color_type, 6);
    assert_eq!(info.bit_depth, 8);
}

#[test]
fn test_chunk_order_indexed_opaque() {
    let pixels = create_solid_pixels(4, 4, [10, 20, 30, 255]);
    let png = create_png_auto(&pixels, 4, 4).unwrap();
    // fully opaque palette: no tRNS chunk
    assert_eq!(png_chunk_types(&png), vec!["IHDR", "PLTE", "IDAT", "IEND"]);
}

#[test]
fn test_chunk_order_indexed_transparent() {
    let pixels = [
        255, 0, 0, 255, // red, opaque
        0, 0, 0, 0, // transparent
    ];
    let png = create_png_auto(&pixels, 2, 1).unwrap();
    assert_eq!(
        png_chunk_types(&png),
        vec!["IHDR", "PLTE", "tRNS", "IDAT", "IEND"]
    );
}

// ============================================================================
// Format selection tests
// ============================================================================

#[test]
fn test_exactly_256_colors_stays_indexed() {
    let pixels = create_banded_pixels(256, 1, 256);
    assert_eq!(count_unique_colors(&pixels), 256);
    let png = create_png_auto(&pixels, 256, 1).unwrap();
    assert_eq!(png_info(&png).unwrap().color_type, 3);
}

#[test]
fn test_257_colors_falls_back_to_rgba() {
    let pixels = create_banded_pixels(257, 1, 257);
    let png = create_png_auto(&pixels, 257, 1).unwrap();
    assert_eq!(png_info(&png).unwrap().color_type, 6);
}

#[test]
fn test_large_image_parallel_extraction() {
    // 128x128 = 16384 pixels, above the parallel extraction threshold
    let pixels = create_banded_pixels(128, 128, 50);
    let png = create_png_auto(&pixels, 128, 128).unwrap();
    assert_eq!(png_info(&png).unwrap().color_type, 3);
}

#[test]
fn test_indexed_smaller_than_rgba_for_few_colors() {
    let pixels = create_banded_pixels(256, 64, 20);

    let indexed = create_png_auto(&pixels, 256, 64).unwrap();
    let rgba = create_png(&pixels, 256, 64).unwrap();

    assert!(
        indexed.len() < rgba.len(),
        "Indexed PNG ({} bytes) should be smaller than RGBA ({} bytes)",
        indexed.len(),
        rgba.len()
    );
}

#[test]
fn test_many_colors_encodes_rgba() {
    let pixels = create_test_rgba_pixels(64, 64);
    let png = create_png_auto(&pixels, 64, 64).unwrap();
    assert_eq!(png_info(&png).unwrap().color_type, 6);
}

// ============================================================================
// Cover encoding
// ============================================================================

#[test]
fn test_encode_solid_cover() {
    let size = CanvasSize::cover();
    let pixels = render_solid(Rgb::new(128, 128, 128), size);
    let png = encode_cover(&pixels, size).unwrap();

    let info = png_info(&png).unwrap();
    assert_eq!((info.width, info.height), (1500, 300));
    assert_eq!(info.color_type, 3);
    // One color over 450k pixels deflates to almost nothing
    assert!(png.len() < 4096, "solid cover is {} bytes", png.len());
}

#[test]
fn test_encode_gradient_cover() {
    let size = CanvasSize::cover();
    let pixels = render_gradient(Rgb::new(255, 0, 0), Rgb::new(0, 0, 255), size);
    let png = encode_cover(&pixels, size).unwrap();

    let info = png_info(&png).unwrap();
    assert_eq!((info.width, info.height), (1500, 300));
    // one color per row, at most 300 rows
    assert!(info.color_type == 3 || info.color_type == 6);
}

#[test]
fn test_encode_cover_rejects_wrong_length() {
    let size = CanvasSize::cover();
    let pixels = vec![0u8; 100];
    let err = encode_cover(&pixels, size).unwrap_err();
    assert!(matches!(err, CoverError::EncodeError(_)));
}

// ============================================================================
// Edge case tests
// ============================================================================

#[test]
fn test_single_pixel() {
    let pixels = [255, 0, 0, 255];
    assert!(create_png_auto(&pixels, 1, 1).is_ok());
}

#[test]
fn test_all_transparent() {
    let pixels = vec![0u8; 10 * 10 * 4];
    assert!(create_png_auto(&pixels, 10, 10).is_ok());
}
