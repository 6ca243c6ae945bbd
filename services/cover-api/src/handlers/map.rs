//! Static map covers.
//!
//! In redirect mode the client is sent to the provider's static image URL.
//! In proxy mode the image is fetched once and served from the disk cache.

use axum::{
    extract::{Extension, Path},
    response::{IntoResponse, Redirect, Response},
};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{instrument, warn};

use cover_common::{CoverError, CoverResult};
use storage::CacheKey;

use super::common::{error_response, png_response};
use crate::config::{Config, MapMode, MapProvider};
use crate::metrics::{CoverKind, Timer};
use crate::state::AppState;

pub const MAX_ZOOM: u8 = 22;

/// A validated map center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
}

impl MapCenter {
    /// Parse and range-check path parameters.
    pub fn parse(lat: &str, lon: &str, zoom: Option<&str>, default_zoom: u8) -> CoverResult<Self> {
        let lat = parse_coordinate("lat", lat, 90.0)?;
        let lon = parse_coordinate("lon", lon, 180.0)?;
        let zoom = match zoom {
            None => default_zoom,
            Some(z) => z
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|z| *z <= MAX_ZOOM)
                .ok_or_else(|| {
                    CoverError::invalid("zoom", format!("'{}' is not a zoom level 0-{}", z, MAX_ZOOM))
                })?,
        };
        Ok(Self { lat, lon, zoom })
    }

    /// Cache key parts; `.` would collide with the key separator.
    fn key_parts(&self) -> [String; 3] {
        [
            format!("{:.5}", self.lat).replace('.', "_"),
            format!("{:.5}", self.lon).replace('.', "_"),
            self.zoom.to_string(),
        ]
    }
}

fn parse_coordinate(param: &str, value: &str, limit: f64) -> CoverResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
        .ok_or_else(|| {
            CoverError::invalid(param, format!("'{}' is not within [-{}, {}]", value, limit, limit))
        })
}

/// Static image URL for the configured provider.
pub fn build_map_url(config: &Config, center: &MapCenter) -> CoverResult<String> {
    let key = config
        .map_api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| CoverError::MapNotConfigured("MAP_API_KEY is not set".to_string()))?;
    let style = config.map_style();
    let base = config.map_base_url();

    Ok(match config.map_provider {
        // Mapbox caps static images at 1280px, so request half size at @2x
        MapProvider::Mapbox => format!(
            "{}/styles/v1/{}/static/{},{},{}/1280x256@2x?access_token={}",
            base, style, center.lon, center.lat, center.zoom, key
        ),
        MapProvider::Google => format!(
            "{}/maps/api/staticmap?center={},{}&zoom={}&size=640x128&scale=2&maptype={}&format=png&key={}",
            base, center.lat, center.lon, center.zoom, style, key
        ),
    })
}

#[instrument(skip(state))]
pub async fn map_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((lat, lon)): Path<(String, String)>,
) -> Response {
    serve_map(&state, &lat, &lon, None).await
}

#[instrument(skip(state))]
pub async fn map_zoom_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((lat, lon, zoom)): Path<(String, String, String)>,
) -> Response {
    serve_map(&state, &lat, &lon, Some(&zoom)).await
}

async fn serve_map(state: &AppState, lat: &str, lon: &str, zoom: Option<&str>) -> Response {
    state.metrics.record_request(CoverKind::Map).await;

    let center = match MapCenter::parse(lat, lon, zoom, state.config.map_default_zoom) {
        Ok(center) => center,
        Err(e) => return error_response(&e),
    };
    let url = match build_map_url(&state.config, &center) {
        Ok(url) => url,
        Err(e) => return error_response(&e),
    };

    match state.config.map_mode {
        MapMode::Redirect => {
            state.metrics.record_map_redirect();
            Redirect::temporary(&url).into_response()
        }
        MapMode::Proxy => proxy_map(state, &center, &url).await,
    }
}

async fn proxy_map(state: &AppState, center: &MapCenter, url: &str) -> Response {
    let [lat, lon, zoom] = center.key_parts();
    let key = CacheKey::new(
        "map",
        [
            state.config.map_provider.as_str().to_string(),
            state.config.map_style().to_string(),
            lat,
            lon,
            zoom,
        ],
    );

    match state.cache.get(&key).await {
        Ok(Some(data)) => {
            state.metrics.record_cache_hit(CoverKind::Map);
            return png_response(data, true);
        }
        Ok(None) => state.metrics.record_cache_miss(CoverKind::Map),
        Err(e) => {
            warn!(key = %key, error = %e, "Cache read failed");
            state.metrics.record_cache_miss(CoverKind::Map);
        }
    }

    let timer = Timer::start();
    let fetched = fetch_map(&state.http, url).await;
    state
        .metrics
        .record_render(CoverKind::Map, timer.elapsed_us(), fetched.is_ok())
        .await;

    let data = match fetched {
        Ok(data) => data,
        Err(e) => {
            state.metrics.record_upstream_error();
            return error_response(&e);
        }
    };
    state.metrics.record_map_proxied(data.len() as u64);

    if let Err(e) = state.cache.put(&key, &data).await {
        warn!(key = %key, error = %e, "Cache write failed");
    }
    png_response(data, false)
}

/// Fetch the provider image. The URL carries the API key, so it is never logged.
async fn fetch_map(client: &reqwest::Client, url: &str) -> CoverResult<Bytes> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CoverError::UpstreamError(e.without_url().to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CoverError::UpstreamError(format!("provider returned {}", status)));
    }

    // Cached files and responses are always PNG
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !content_type.starts_with("image/png") {
        return Err(CoverError::UpstreamError(format!(
            "provider returned '{}' instead of image/png",
            content_type
        )));
    }

    response
        .bytes()
        .await
        .map_err(|e| CoverError::UpstreamError(e.without_url().to_string()))
}
