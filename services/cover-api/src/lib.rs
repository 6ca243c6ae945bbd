//! Cover image API service library.
//!
//! This module exposes the router and internal modules for testing purposes.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod state;

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Build the application router with all routes and middleware.
pub fn app(state: Arc<AppState>, prometheus_handle: PrometheusHandle) -> Router {
    Router::new()
        // Landing page
        .route("/", get(handlers::index_handler))
        // Covers
        .route("/solid/:color", get(handlers::solid_handler))
        .route("/gradient/:top/:bottom", get(handlers::gradient_handler))
        .route("/text/:text", get(handlers::text_handler))
        .route(
            "/text/:text/:color/:background",
            get(handlers::text_colored_handler),
        )
        .route("/emoji/:name", get(handlers::emoji_handler))
        .route("/emoji/:name/:background", get(handlers::emoji_background_handler))
        .route("/chess/fen/*fen", get(handlers::chess_fen_handler))
        .route("/chess/:opening", get(handlers::chess_opening_handler))
        // Maps
        .route("/map/:lat/:lon", get(handlers::map_handler))
        .route("/map/:lat/:lon/:zoom", get(handlers::map_zoom_handler))
        // Health check
        .route("/health", get(handlers::health_handler))
        // Metrics
        .route("/metrics", get(handlers::metrics_handler))
        // API endpoints
        .route("/api/metrics", get(handlers::api_metrics_handler))
        .route("/api/cache/stats", get(handlers::cache_stats_handler))
        .route("/api/openings", get(handlers::openings_handler))
        // Layer extensions
        .layer(Extension(state))
        .layer(Extension(prometheus_handle))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
