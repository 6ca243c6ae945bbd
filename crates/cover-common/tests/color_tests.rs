//! Tests for color parameter validation.

use cover_common::color::{check_color, parse_color, CoverColor, Rgb};

// ============================================================================
// Named colors
// ============================================================================

#[test]
fn test_named_color() {
    let color = parse_color("red").unwrap();
    assert_eq!(color.key, "red");
    assert_eq!(color.rgb, Rgb::new(255, 0, 0));
}

#[test]
fn test_named_color_case_insensitive() {
    let color = parse_color("CornflowerBlue").unwrap();
    assert_eq!(color.key, "cornflowerblue");
    assert_eq!(color.rgb, Rgb::new(100, 149, 237));
}

#[test]
fn test_grey_spellings() {
    assert_eq!(parse_color("gray").unwrap().rgb, parse_color("grey").unwrap().rgb);
    assert_eq!(
        parse_color("darkslategray").unwrap().rgb,
        parse_color("darkslategrey").unwrap().rgb
    );
}

// ============================================================================
// Hex colors
// ============================================================================

#[test]
fn test_hex_color() {
    let color = parse_color("ff5500").unwrap();
    assert_eq!(color.key, "ff5500");
    assert_eq!(color.rgb, Rgb::new(255, 85, 0));
}

#[test]
fn test_hex_color_uppercase_normalized() {
    let color = parse_color("AABBCC").unwrap();
    assert_eq!(color.key, "aabbcc");
    assert_eq!(color.rgb, Rgb::new(0xaa, 0xbb, 0xcc));
}

#[test]
fn test_hex_color_with_hash() {
    let color = parse_color("#00ff00").unwrap();
    assert_eq!(color.key, "00ff00");
}

#[test]
fn test_hex_wrong_length_rejected() {
    assert!(parse_color("fff").is_none());
    assert!(parse_color("fffffff").is_none());
    assert!(parse_color("ff55001").is_none());
}

#[test]
fn test_non_hex_digits_rejected() {
    assert!(parse_color("gg0000").is_none());
    assert!(parse_color("12345z").is_none());
}

// ============================================================================
// Fallbacks
// ============================================================================

#[test]
fn test_check_color_falls_back() {
    let color = check_color("notacolor", CoverColor::gray());
    assert_eq!(color.key, "gray");
    assert_eq!(color.rgb, Rgb::new(128, 128, 128));
}

#[test]
fn test_check_color_empty_falls_back() {
    let color = check_color("", CoverColor::white());
    assert_eq!(color.key, "white");
}

#[test]
fn test_check_color_keeps_valid() {
    let color = check_color("navy", CoverColor::white());
    assert_eq!(color.key, "navy");
}

#[test]
fn test_builtin_fallbacks() {
    assert_eq!(CoverColor::black().rgb, Rgb::new(0, 0, 0));
    assert_eq!(CoverColor::white().rgb, Rgb::new(255, 255, 255));
    assert_eq!(CoverColor::gray().rgb, Rgb::new(128, 128, 128));
}

// ============================================================================
// Shared fixtures
// ============================================================================

#[test]
fn test_fixture_colors_resolve() {
    use test_utils::colors;

    for (input, (r, g, b)) in colors::NAMED.iter().chain(colors::HEX) {
        let color = parse_color(input).unwrap_or_else(|| panic!("{} should parse", input));
        assert_eq!(color.rgb, Rgb::new(*r, *g, *b), "{}", input);
    }
    for input in colors::INVALID {
        assert!(parse_color(input).is_none(), "{:?} should be rejected", input);
        assert_eq!(check_color(input, CoverColor::gray()), CoverColor::gray());
    }
}
