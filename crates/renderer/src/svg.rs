//! SVG rasterization through resvg.
//!
//! Chess boards and emoji glyphs are described as SVG documents and rendered
//! here. The font database is loaded once and shared between requests.

use std::path::Path;
use std::sync::Arc;

use cover_common::{CanvasSize, CoverError, CoverResult};
use usvg::fontdb;

/// Renders SVG documents to straight-alpha RGBA buffers.
#[derive(Clone)]
pub struct SvgRasterizer {
    fontdb: Arc<fontdb::Database>,
}

impl SvgRasterizer {
    /// Build a rasterizer with system fonts plus any fonts found in `font_dir`.
    pub fn new(font_dir: Option<&Path>) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = font_dir {
            db.load_fonts_dir(dir);
        }
        tracing::info!(faces = db.len(), "Loaded font database for SVG rendering");
        Self::with_database(db)
    }

    /// Build a rasterizer around an existing font database.
    pub fn with_database(db: fontdb::Database) -> Self {
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Number of font faces available to `<text>` elements.
    pub fn font_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Rasterize `svg` into an RGBA buffer of exactly `size`.
    ///
    /// The document is drawn at its natural size from the top-left corner;
    /// callers build documents with matching `width`/`height` attributes.
    pub fn rasterize(&self, svg: &str, size: CanvasSize) -> CoverResult<Vec<u8>> {
        let mut opt = usvg::Options::default();
        opt.fontdb = self.fontdb.clone();

        let tree = usvg::Tree::from_str(svg, &opt)
            .map_err(|e| CoverError::RenderError(format!("SVG parse failed: {}", e)))?;

        let mut pixmap = tiny_skia::Pixmap::new(size.width, size.height).ok_or_else(|| {
            CoverError::RenderError(format!("cannot allocate {} pixmap", size))
        })?;

        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        Ok(demultiply(&pixmap))
    }
}

impl std::fmt::Debug for SvgRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgRasterizer")
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

/// tiny-skia stores premultiplied RGBA; the PNG encoder wants straight alpha.
fn demultiply(pixmap: &tiny_skia::Pixmap) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

/// Escape text for inclusion in SVG character data or attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_rasterizer() -> SvgRasterizer {
        SvgRasterizer::with_database(fontdb::Database::new())
    }

    #[test]
    fn test_rasterize_rect() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2"><rect width="4" height="2" fill="#ff0000"/></svg>"##;
        let pixels = empty_rasterizer()
            .rasterize(svg, CanvasSize::new(4, 2))
            .unwrap();
        assert_eq!(pixels.len(), 4 * 2 * 4);
        assert_eq!(&pixels[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_rasterize_invalid_svg() {
        let err = empty_rasterizer()
            .rasterize("<not-svg", CanvasSize::new(4, 2))
            .unwrap_err();
        assert!(matches!(err, CoverError::RenderError(_)));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
