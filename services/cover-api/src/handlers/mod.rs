//! HTTP request handlers.
//!
//! - `covers` - solid, gradient, text, emoji and chess covers
//! - `map` - static map redirects and proxying
//! - `metrics` - health, Prometheus and JSON stats endpoints
//! - `common` - response helpers and the cache-or-render flow

pub mod common;
pub mod covers;
pub mod map;
pub mod metrics;

pub use covers::{
    chess_fen_handler, chess_opening_handler, emoji_background_handler, emoji_handler,
    gradient_handler, openings_handler, solid_handler, text_colored_handler, text_handler,
};
pub use map::{map_handler, map_zoom_handler};
pub use metrics::{api_metrics_handler, cache_stats_handler, health_handler, metrics_handler};

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Landing page listing the available covers.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
