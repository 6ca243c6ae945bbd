//! Emoji covers: name resolution and centered glyph rendering.

use cover_common::{CanvasSize, CoverError, CoverResult, Rgb};

use crate::svg::{escape_xml, SvgRasterizer};

/// Glyph size in pixels. Matches the native bitmap strike of Noto Color Emoji.
pub const EMOJI_FONT_SIZE: f32 = 109.0;

/// Font families tried, in order, for emoji glyphs.
const EMOJI_FONT_FAMILIES: &str =
    "'Noto Color Emoji', 'Apple Color Emoji', 'Segoe UI Emoji', 'Twemoji Mozilla', sans-serif";

/// A resolved emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEmoji {
    /// The emoji itself, e.g. "👍"
    pub glyph: &'static str,
    /// CLDR short name, e.g. "thumbs up"
    pub name: &'static str,
}

impl ResolvedEmoji {
    fn from_emoji(emoji: &'static emojis::Emoji) -> Self {
        Self {
            glyph: emoji.as_str(),
            name: emoji.name(),
        }
    }

    /// Cache-key form of the name: "thumbs_up".
    pub fn slug(&self) -> String {
        self.name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect()
    }
}

/// Resolve an emoji parameter.
///
/// Accepted spellings:
/// - the emoji itself ("👍")
/// - CLDR names, with or without colons, `_` or spaces ("thumbs_up", ":thumbs up:")
/// - GitHub shortcodes ("thumbsup", "+1")
pub fn resolve_emoji(input: &str) -> CoverResult<ResolvedEmoji> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoverError::invalid("emoji", "emoji name must not be empty"));
    }

    if let Some(emoji) = emojis::get(trimmed) {
        return Ok(ResolvedEmoji::from_emoji(emoji));
    }

    let name = trimmed.trim_matches(':');
    if let Some(emoji) = emojis::get_by_shortcode(name) {
        return Ok(ResolvedEmoji::from_emoji(emoji));
    }

    let spaced = name.replace('_', " ");
    emojis::iter()
        .find(|e| e.name().eq_ignore_ascii_case(&spaced))
        .or_else(|| emojis::get_by_shortcode(&name.to_ascii_lowercase()))
        .map(ResolvedEmoji::from_emoji)
        .ok_or_else(|| CoverError::UnknownEmoji(input.to_string()))
}

/// SVG document with the glyph centered over the background.
pub fn emoji_svg(emoji: &ResolvedEmoji, background: Rgb, size: CanvasSize) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<rect width="{w}" height="{h}" fill="{bg}"/>"#,
            r#"<text x="{cx}" y="{cy}" font-family="{family}" font-size="{fs}" "#,
            r#"text-anchor="middle" dominant-baseline="central">{glyph}</text>"#,
            "</svg>"
        ),
        w = size.width,
        h = size.height,
        bg = background.to_hex(),
        cx = size.width as f32 / 2.0,
        cy = size.height as f32 / 2.0,
        family = EMOJI_FONT_FAMILIES,
        fs = EMOJI_FONT_SIZE,
        glyph = escape_xml(emoji.glyph),
    )
}

/// Render an emoji cover as RGBA.
pub fn render_emoji(
    rasterizer: &SvgRasterizer,
    emoji: &ResolvedEmoji,
    background: Rgb,
    size: CanvasSize,
) -> CoverResult<Vec<u8>> {
    rasterizer.rasterize(&emoji_svg(emoji, background, size), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        let emoji = resolve_emoji("👍").unwrap();
        assert_eq!(emoji.slug(), "thumbs_up");
    }

    #[test]
    fn test_svg_contains_glyph_and_background() {
        let emoji = resolve_emoji("thumbs_up").unwrap();
        let svg = emoji_svg(&emoji, Rgb::new(255, 255, 255), CanvasSize::cover());
        assert!(svg.contains("👍"));
        assert!(svg.contains(r##"fill="#ffffff""##));
        assert!(svg.contains(r#"x="750""#));
        assert!(svg.contains(r#"y="150""#));
    }
}
