//! Application state and shared resources.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use renderer::SvgRasterizer;
use rusttype::Font;
use storage::DiskCache;

use crate::config::Config;
use crate::metrics::MetricsCollector;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub cache: DiskCache,
    pub rasterizer: SvgRasterizer,
    /// Text font; `None` when `font_path` could not be loaded.
    pub font: Option<Font<'static>>,
    pub http: reqwest::Client,
    pub metrics: Arc<MetricsCollector>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let cache = DiskCache::open(&config.cache_dir)
            .await
            .with_context(|| format!("Failed to open cache at {}", config.cache_dir.display()))?;

        let font = match renderer::load_font(&config.font_path) {
            Ok(font) => {
                tracing::info!(path = %config.font_path.display(), "Loaded text font");
                Some(font)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Text covers disabled");
                None
            }
        };

        let font_dir = config.font_dir.clone();
        let rasterizer =
            tokio::task::spawn_blocking(move || SvgRasterizer::new(font_dir.as_deref()))
                .await
                .context("Font database loading panicked")?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.map_timeout_secs))
            .user_agent(concat!("cover-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        if config.map_api_key.is_none() {
            tracing::warn!("MAP_API_KEY not set, map covers disabled");
        }

        Ok(Self {
            config,
            cache,
            rasterizer,
            font,
            http,
            metrics: Arc::new(MetricsCollector::new()),
        })
    }
}
