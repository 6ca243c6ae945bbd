//! Common utilities shared across cover handlers.

use axum::{
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::{error, warn};

use cover_common::{CoverError, CoverResult};
use storage::CacheKey;

use crate::metrics::{CoverKind, Timer};
use crate::state::AppState;

/// Covers never change for a given URL.
pub const COVER_CACHE_CONTROL: &str = "public, max-age=86400";

pub static X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Plain-text error response with the error's HTTP status.
pub fn error_response(err: &CoverError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "Request failed");
    }
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        err.to_string(),
    )
        .into_response()
}

/// PNG response with cover caching headers.
pub fn png_response(data: Bytes, cache_hit: bool) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, COVER_CACHE_CONTROL),
            (X_CACHE.clone(), if cache_hit { "HIT" } else { "MISS" }),
        ],
        data,
    )
        .into_response()
}

/// Serve a cover from the disk cache, rendering and storing it on a miss.
///
/// `render` produces the encoded PNG and runs on the blocking pool.
pub async fn serve_cover<F>(state: &AppState, kind: CoverKind, key: CacheKey, render: F) -> Response
where
    F: FnOnce() -> CoverResult<Vec<u8>> + Send + 'static,
{
    match state.cache.get(&key).await {
        Ok(Some(data)) => {
            state.metrics.record_cache_hit(kind);
            return png_response(data, true);
        }
        Ok(None) => state.metrics.record_cache_miss(kind),
        // An unreadable file is treated as missing and rendered again
        Err(e) => {
            warn!(key = %key, error = %e, "Cache read failed");
            state.metrics.record_cache_miss(kind);
        }
    }

    let timer = Timer::start();
    let rendered = tokio::task::spawn_blocking(render)
        .await
        .map_err(|e| CoverError::InternalError(format!("render task failed: {}", e)))
        .and_then(|result| result);
    let elapsed = timer.elapsed_us();

    let png = match rendered {
        Ok(png) => png,
        Err(e) => {
            state
                .metrics
                .record_render(kind, elapsed, false)
                .await;
            return error_response(&e);
        }
    };
    state.metrics.record_render(kind, elapsed, true).await;
    tracing::info!(
        key = %key,
        bytes = png.len(),
        render_ms = elapsed as f64 / 1000.0,
        "Rendered cover"
    );

    // The image is served even if it could not be cached
    if let Err(e) = state.cache.put(&key, &png).await {
        warn!(key = %key, error = %e, "Cache write failed");
    }

    png_response(Bytes::from(png), false)
}
