//! Cover image rendering.
//!
//! Implements the cover styles:
//! - Solid fill and two-stop vertical gradient
//! - Centered text (TrueType via rusttype)
//! - Centered emoji glyph (SVG text via resvg)
//! - Chess diagrams (SVG via resvg)
//!
//! plus the PNG encoder every style is written out with.

pub mod chess;
pub mod emoji;
pub mod gradient;
pub mod png;
pub mod svg;
pub mod text;

pub use chess::{find_opening, Board, DiagramOptions, Opening, OPENINGS};
pub use emoji::{resolve_emoji, ResolvedEmoji};
pub use gradient::{render_gradient, render_solid};
pub use png::encode_cover;
pub use svg::SvgRasterizer;
pub use text::{load_font, render_text, TextConfig};
