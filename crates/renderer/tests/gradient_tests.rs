//! Tests for solid and gradient fills.

use cover_common::{check_color, CanvasSize, CoverColor, Rgb};
use renderer::gradient::{blend, gradient_mask, render_gradient, render_solid};
use test_utils::{assert_pixel_approx_eq, count_unique_colors, pixel_at};

const W: usize = 1500;

#[test]
fn test_solid_fills_every_pixel() {
    let size = CanvasSize::cover();
    let pixels = render_solid(Rgb::new(30, 144, 255), size);

    assert_eq!(pixels.len(), size.rgba_len());
    assert_eq!(count_unique_colors(&pixels), 1);
    assert_eq!(pixel_at(&pixels, W, 0, 0), [30, 144, 255, 255]);
    assert_eq!(pixel_at(&pixels, W, 1499, 299), [30, 144, 255, 255]);
}

#[test]
fn test_solid_fallback_color_is_gray() {
    let color = check_color("not-a-color", CoverColor::gray());
    let pixels = render_solid(color.rgb, CanvasSize::new(2, 2));
    assert_eq!(pixel_at(&pixels, 2, 1, 1), [128, 128, 128, 255]);
}

#[test]
fn test_gradient_first_row_is_top_color() {
    let top = Rgb::new(255, 0, 0);
    let bottom = Rgb::new(0, 0, 255);
    let pixels = render_gradient(top, bottom, CanvasSize::cover());

    assert_eq!(pixel_at(&pixels, W, 0, 0), [255, 0, 0, 255]);
    assert_eq!(pixel_at(&pixels, W, 1499, 0), [255, 0, 0, 255]);
}

#[test]
fn test_gradient_last_row_near_bottom_color() {
    let top = Rgb::new(255, 0, 0);
    let bottom = Rgb::new(0, 0, 255);
    let pixels = render_gradient(top, bottom, CanvasSize::cover());

    // mask reaches 254 on the last row, never exactly 255
    assert_pixel_approx_eq!(pixel_at(&pixels, W, 0, 299), [0, 0, 255, 255], 1);
}

#[test]
fn test_gradient_middle_row_is_midpoint() {
    let pixels = render_gradient(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255), CanvasSize::cover());
    assert_pixel_approx_eq!(pixel_at(&pixels, W, 700, 150), [127, 127, 127, 255], 1);
}

#[test]
fn test_gradient_rows_are_uniform() {
    let pixels = render_gradient(Rgb::new(10, 200, 30), Rgb::new(240, 20, 90), CanvasSize::cover());
    for y in [0, 75, 150, 299] {
        let first = pixel_at(&pixels, W, 0, y);
        assert_eq!(pixel_at(&pixels, W, 750, y), first);
        assert_eq!(pixel_at(&pixels, W, 1499, y), first);
    }
}

#[test]
fn test_gradient_is_monotonic() {
    let pixels = render_gradient(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255), CanvasSize::cover());
    let mut previous = 0u8;
    for y in 0..300 {
        let value = pixel_at(&pixels, W, 0, y)[0];
        assert!(value >= previous, "row {} darker than row {}", y, y - 1);
        previous = value;
    }
}

#[test]
fn test_same_colors_give_solid() {
    let c = Rgb::new(50, 60, 70);
    let pixels = render_gradient(c, c, CanvasSize::new(10, 10));
    assert_eq!(count_unique_colors(&pixels), 1);
}

#[test]
fn test_mask_matches_integer_formula() {
    for y in 0..300u32 {
        assert_eq!(gradient_mask(y, 300) as u32, 255 * y / 300);
    }
}

#[test]
fn test_blend_is_symmetric() {
    let a = Rgb::new(0, 100, 200);
    let b = Rgb::new(200, 100, 0);
    let ab = blend(a, b, 64);
    let ba = blend(b, a, 191);
    assert_eq!(ab, ba);
}
