//! Health check and metrics handlers.

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use super::common::error_response;
use crate::state::AppState;

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Prometheus text exposition
pub async fn metrics_handler(Extension(handle): Extension<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
}

/// JSON metrics endpoint
pub async fn api_metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let snapshot = state.metrics.snapshot().await;

    let cache_stats = match state.cache.stats().await {
        Ok(stats) => serde_json::json!({
            "available": true,
            "total_files": stats.total_files,
            "total_bytes": stats.total_bytes,
        }),
        Err(_) => serde_json::json!({
            "available": false,
            "total_files": 0,
            "total_bytes": 0,
        }),
    };

    Json(serde_json::json!({
        "metrics": snapshot,
        "cache": cache_stats,
        "fonts": {
            "text_font_loaded": state.font.is_some(),
            "svg_font_faces": state.rasterizer.font_count(),
        },
    }))
    .into_response()
}

/// Disk cache statistics per cover kind
pub async fn cache_stats_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match state.cache.stats().await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => error_response(&e),
    }
}
