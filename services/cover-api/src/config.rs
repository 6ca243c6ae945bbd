//! Service configuration from command-line flags and environment variables.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Default text font (DejaVu Sans as installed by Debian/Ubuntu).
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

/// Static map provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MapProvider {
    Mapbox,
    Google,
}

impl MapProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapProvider::Mapbox => "mapbox",
            MapProvider::Google => "google",
        }
    }

    /// Scheme and host static image requests go to.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            MapProvider::Mapbox => "https://api.mapbox.com",
            MapProvider::Google => "https://maps.googleapis.com",
        }
    }

    /// Style used when `MAP_STYLE` is not set.
    pub fn default_style(&self) -> &'static str {
        match self {
            MapProvider::Mapbox => "mapbox/streets-v12",
            MapProvider::Google => "roadmap",
        }
    }
}

/// How map requests are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MapMode {
    /// 307 redirect to the provider's static image URL
    Redirect,
    /// Fetch the image server-side and cache it on disk
    Proxy,
}

/// Cover API server
#[derive(Parser, Debug, Clone)]
#[command(name = "cover-api")]
#[command(about = "Renders PNG page covers from URL parameters")]
pub struct Config {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000", env = "COVER_LISTEN_ADDR")]
    pub listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Number of worker threads
    #[arg(long, env = "COVER_WORKER_THREADS")]
    pub worker_threads: Option<usize>,

    /// Directory for cached PNGs
    #[arg(long, default_value = "./cache", env = "COVER_CACHE_DIR")]
    pub cache_dir: PathBuf,

    /// TrueType font used for text covers
    #[arg(long, default_value = DEFAULT_FONT_PATH, env = "COVER_FONT_PATH")]
    pub font_path: PathBuf,

    /// Extra font directory for emoji and chess glyphs
    #[arg(long, env = "COVER_FONT_DIR")]
    pub font_dir: Option<PathBuf>,

    /// Static map provider
    #[arg(long, value_enum, default_value = "mapbox", env = "MAP_PROVIDER")]
    pub map_provider: MapProvider,

    /// Static map API key (map routes answer 503 without one)
    #[arg(long, env = "MAP_API_KEY", hide_env_values = true)]
    pub map_api_key: Option<String>,

    /// Provider style (Mapbox style id or Google maptype)
    #[arg(long, env = "MAP_STYLE")]
    pub map_style: Option<String>,

    /// Provider host override, e.g. a caching relay in front of the provider
    #[arg(long, env = "MAP_BASE_URL")]
    pub map_base_url: Option<String>,

    /// Redirect to the provider or proxy its image
    #[arg(long, value_enum, default_value = "redirect", env = "MAP_MODE")]
    pub map_mode: MapMode,

    /// Zoom level used by /map/:lat/:lon
    #[arg(
        long,
        default_value = "12",
        env = "MAP_DEFAULT_ZOOM",
        value_parser = clap::value_parser!(u8).range(0..=22)
    )]
    pub map_default_zoom: u8,

    /// Upstream timeout for proxied map requests, in seconds
    #[arg(long, default_value = "10", env = "MAP_TIMEOUT_SECS")]
    pub map_timeout_secs: u64,
}

impl Config {
    /// Style for the configured provider, falling back to its default.
    pub fn map_style(&self) -> &str {
        self.map_style
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.map_provider.default_style())
    }

    /// Provider host without a trailing slash.
    pub fn map_base_url(&self) -> &str {
        self.map_base_url
            .as_deref()
            .map(|u| u.trim().trim_end_matches('/'))
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| self.map_provider.default_base_url())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            worker_threads: None,
            cache_dir: PathBuf::from("./cache"),
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            font_dir: None,
            map_provider: MapProvider::Mapbox,
            map_api_key: None,
            map_style: None,
            map_base_url: None,
            map_mode: MapMode::Redirect,
            map_default_zoom: 12,
            map_timeout_secs: 10,
        }
    }
}
