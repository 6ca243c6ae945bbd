//! Cover handlers: solid, gradient, text, emoji and chess.

use axum::{
    extract::{Extension, Path, Query},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use cover_common::{check_color, CanvasSize, CoverColor, CoverError, CoverResult};
use renderer::chess::{self, Board, DiagramOptions, OPENINGS};
use renderer::{emoji, encode_cover, gradient, render_text, TextConfig};
use storage::CacheKey;

use super::common::{error_response, serve_cover};
use crate::metrics::CoverKind;
use crate::state::AppState;

// ============================================================================
// Solid and gradient
// ============================================================================

#[instrument(skip(state))]
pub async fn solid_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(color): Path<String>,
) -> Response {
    state.metrics.record_request(CoverKind::Solid).await;

    let color = check_color(&color, CoverColor::gray());
    let key = CacheKey::new("solid", [color.key.clone()]);
    let size = CanvasSize::cover();

    serve_cover(&state, CoverKind::Solid, key, move || {
        encode_cover(&gradient::render_solid(color.rgb, size), size)
    })
    .await
}

#[instrument(skip(state))]
pub async fn gradient_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((top, bottom)): Path<(String, String)>,
) -> Response {
    state.metrics.record_request(CoverKind::Gradient).await;

    let top = check_color(&top, CoverColor::gray());
    let bottom = check_color(&bottom, CoverColor::white());
    let key = CacheKey::new("gradient", [top.key.clone(), bottom.key.clone()]);
    let size = CanvasSize::cover();

    serve_cover(&state, CoverKind::Gradient, key, move || {
        encode_cover(&gradient::render_gradient(top.rgb, bottom.rgb, size), size)
    })
    .await
}

// ============================================================================
// Text
// ============================================================================

#[instrument(skip(state))]
pub async fn text_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(text): Path<String>,
) -> Response {
    render_text_cover(state, text, CoverColor::black(), CoverColor::white()).await
}

#[instrument(skip(state))]
pub async fn text_colored_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((text, color, background)): Path<(String, String, String)>,
) -> Response {
    let color = check_color(&color, CoverColor::black());
    let background = check_color(&background, CoverColor::white());
    render_text_cover(state, text, color, background).await
}

async fn render_text_cover(
    state: Arc<AppState>,
    text: String,
    color: CoverColor,
    background: CoverColor,
) -> Response {
    state.metrics.record_request(CoverKind::Text).await;

    let text = text.trim().to_string();
    if text.is_empty() {
        return error_response(&CoverError::invalid("text", "text must not be empty"));
    }
    let Some(font) = state.font.clone() else {
        return error_response(&CoverError::FontError(format!(
            "no text font loaded from {}",
            state.config.font_path.display()
        )));
    };

    let key = CacheKey::new("text", [text.clone(), color.key.clone(), background.key.clone()]);
    let size = CanvasSize::cover();
    let config = TextConfig {
        color: color.rgb,
        background: background.rgb,
        ..TextConfig::default()
    };

    serve_cover(&state, CoverKind::Text, key, move || {
        let img = render_text(&text, &font, size, &config)?;
        encode_cover(&img.into_raw(), size)
    })
    .await
}

// ============================================================================
// Emoji
// ============================================================================

#[instrument(skip(state))]
pub async fn emoji_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    render_emoji_cover(state, name, CoverColor::white()).await
}

#[instrument(skip(state))]
pub async fn emoji_background_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((name, background)): Path<(String, String)>,
) -> Response {
    let background = check_color(&background, CoverColor::white());
    render_emoji_cover(state, name, background).await
}

async fn render_emoji_cover(state: Arc<AppState>, name: String, background: CoverColor) -> Response {
    state.metrics.record_request(CoverKind::Emoji).await;

    let resolved = match emoji::resolve_emoji(&name) {
        Ok(resolved) => resolved,
        Err(e) => return error_response(&e),
    };

    let key = CacheKey::new("emoji", [resolved.slug(), background.key.clone()]);
    let size = CanvasSize::cover();
    let rasterizer = state.rasterizer.clone();

    serve_cover(&state, CoverKind::Emoji, key, move || {
        let pixels = emoji::render_emoji(&rasterizer, &resolved, background.rgb, size)?;
        encode_cover(&pixels, size)
    })
    .await
}

// ============================================================================
// Chess
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ChessParams {
    /// `white` (default) or `black`
    orientation: Option<String>,
}

impl ChessParams {
    fn flipped(&self) -> CoverResult<bool> {
        match self.orientation.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("") | Some("white") | Some("w") => Ok(false),
            Some("black") | Some("b") => Ok(true),
            Some(other) => Err(CoverError::invalid(
                "orientation",
                format!("expected 'white' or 'black', got '{}'", other),
            )),
        }
    }
}

#[instrument(skip(state))]
pub async fn chess_opening_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(opening): Path<String>,
    Query(params): Query<ChessParams>,
) -> Response {
    state.metrics.record_request(CoverKind::Chess).await;

    let opening = match chess::find_opening(&opening) {
        Ok(opening) => opening,
        Err(e) => return error_response(&e),
    };
    let board = match Board::from_fen(opening.fen) {
        Ok(board) => board,
        Err(e) => return error_response(&e),
    };
    render_chess_cover(&state, opening.slug.to_string(), board, &params).await
}

#[instrument(skip(state))]
pub async fn chess_fen_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(fen): Path<String>,
    Query(params): Query<ChessParams>,
) -> Response {
    state.metrics.record_request(CoverKind::Chess).await;

    // '_' stands in for the spaces between FEN fields
    let fen = fen.trim_start_matches('/').replace('_', " ");
    let board = match Board::from_fen(&fen) {
        Ok(board) => board,
        Err(e) => return error_response(&e),
    };
    // Only placement affects the diagram, so it alone identifies the image
    render_chess_cover(&state, board.placement(), board, &params).await
}

async fn render_chess_cover(
    state: &AppState,
    position: String,
    board: Board,
    params: &ChessParams,
) -> Response {
    let flipped = match params.flipped() {
        Ok(flipped) => flipped,
        Err(e) => return error_response(&e),
    };

    let orientation = if flipped { "black" } else { "white" };
    let key = CacheKey::new("chess", [position, orientation.to_string()]);
    let size = CanvasSize::cover();
    let options = DiagramOptions {
        flipped,
        ..DiagramOptions::default()
    };
    let rasterizer = state.rasterizer.clone();

    serve_cover(state, CoverKind::Chess, key, move || {
        let pixels = chess::render_board(&rasterizer, &board, size, &options)?;
        encode_cover(&pixels, size)
    })
    .await
}

/// JSON list of named openings.
pub async fn openings_handler() -> impl IntoResponse {
    Json(OPENINGS)
}
