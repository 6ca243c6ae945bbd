//! Application metrics collection and reporting.

use metrics::{counter, histogram};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::RwLock;

/// Cover styles, used as a metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverKind {
    Solid,
    Gradient,
    Text,
    Emoji,
    Chess,
    Map,
}

impl CoverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverKind::Solid => "solid",
            CoverKind::Gradient => "gradient",
            CoverKind::Text => "text",
            CoverKind::Emoji => "emoji",
            CoverKind::Chess => "chess",
            CoverKind::Map => "map",
        }
    }
}

/// Metrics collector for the cover API.
#[derive(Debug)]
pub struct MetricsCollector {
    /// Request counts
    pub requests_total: AtomicU64,
    pub cache_hits: AtomicU64,
    pub cache_misses: AtomicU64,

    /// Render stats
    pub renders_total: AtomicU64,
    pub render_errors: AtomicU64,

    /// Map stats
    pub map_redirects: AtomicU64,
    pub map_proxied: AtomicU64,
    pub upstream_errors: AtomicU64,

    /// Per-kind request counts and render timing
    kind_requests: RwLock<HashMap<CoverKind, u64>>,
    kind_times: RwLock<HashMap<CoverKind, TimingStats>>,

    /// Start time for uptime calculation
    start_time: Instant,
}

#[derive(Debug, Default, Clone)]
struct TimingStats {
    count: u64,
    total_us: u64,
    min_us: u64,
    max_us: u64,
    last_us: u64,
}

impl TimingStats {
    fn record(&mut self, duration_us: u64) {
        self.count += 1;
        self.total_us += duration_us;
        self.last_us = duration_us;
        if self.min_us == 0 || duration_us < self.min_us {
            self.min_us = duration_us;
        }
        if duration_us > self.max_us {
            self.max_us = duration_us;
        }
    }

    fn avg_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.total_us as f64 / self.count as f64) / 1000.0
        }
    }
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            requests_total: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            renders_total: AtomicU64::new(0),
            render_errors: AtomicU64::new(0),
            map_redirects: AtomicU64::new(0),
            map_proxied: AtomicU64::new(0),
            upstream_errors: AtomicU64::new(0),
            kind_requests: RwLock::new(HashMap::new()),
            kind_times: RwLock::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Record an incoming cover request
    pub async fn record_request(&self, kind: CoverKind) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        counter!("cover_requests_total", "kind" => kind.as_str()).increment(1);
        *self.kind_requests.write().await.entry(kind).or_insert(0) += 1;
    }

    pub fn record_cache_hit(&self, kind: CoverKind) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
        counter!("cover_cache_hits_total", "kind" => kind.as_str()).increment(1);
    }

    pub fn record_cache_miss(&self, kind: CoverKind) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
        counter!("cover_cache_misses_total", "kind" => kind.as_str()).increment(1);
    }

    /// Record a render (or upstream fetch) with its duration
    pub async fn record_render(&self, kind: CoverKind, duration_us: u64, success: bool) {
        self.renders_total.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.render_errors.fetch_add(1, Ordering::Relaxed);
            counter!("cover_render_errors_total", "kind" => kind.as_str()).increment(1);
        }
        counter!("cover_renders_total", "kind" => kind.as_str()).increment(1);
        histogram!("cover_render_duration_ms", "kind" => kind.as_str())
            .record(duration_us as f64 / 1000.0);

        self.kind_times
            .write()
            .await
            .entry(kind)
            .or_default()
            .record(duration_us);
    }

    pub fn record_map_redirect(&self) {
        self.map_redirects.fetch_add(1, Ordering::Relaxed);
        counter!("map_redirects_total").increment(1);
    }

    pub fn record_map_proxied(&self, bytes: u64) {
        self.map_proxied.fetch_add(1, Ordering::Relaxed);
        counter!("map_proxied_total").increment(1);
        counter!("map_proxied_bytes_total").increment(bytes);
    }

    pub fn record_upstream_error(&self) {
        self.upstream_errors.fetch_add(1, Ordering::Relaxed);
        counter!("map_upstream_errors_total").increment(1);
    }

    /// Point-in-time copy of all counters for the JSON endpoint
    pub async fn snapshot(&self) -> MetricsSnapshot {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let lookups = hits + misses;

        let requests = self.kind_requests.read().await;
        let times = self.kind_times.read().await;
        let mut kinds = HashMap::new();
        for (kind, count) in requests.iter() {
            let timing = times.get(kind).cloned().unwrap_or_default();
            kinds.insert(
                *kind,
                KindStats {
                    requests: *count,
                    renders: timing.count,
                    render_avg_ms: timing.avg_ms(),
                    render_last_ms: timing.last_us as f64 / 1000.0,
                    render_min_ms: timing.min_us as f64 / 1000.0,
                    render_max_ms: timing.max_us as f64 / 1000.0,
                },
            );
        }

        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            requests_total: self.requests_total.load(Ordering::Relaxed),
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate: if lookups == 0 {
                0.0
            } else {
                hits as f64 / lookups as f64 * 100.0
            },
            renders_total: self.renders_total.load(Ordering::Relaxed),
            render_errors: self.render_errors.load(Ordering::Relaxed),
            map_redirects: self.map_redirects.load(Ordering::Relaxed),
            map_proxied: self.map_proxied.load(Ordering::Relaxed),
            upstream_errors: self.upstream_errors.load(Ordering::Relaxed),
            kinds,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-kind statistics
#[derive(Debug, Clone, Serialize)]
pub struct KindStats {
    pub requests: u64,
    pub renders: u64,
    pub render_avg_ms: f64,
    pub render_last_ms: f64,
    pub render_min_ms: f64,
    pub render_max_ms: f64,
}

/// Serializable metrics snapshot
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub requests_total: u64,

    // Cache stats
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_hit_rate: f64,

    // Render stats
    pub renders_total: u64,
    pub render_errors: u64,

    // Map stats
    pub map_redirects: u64,
    pub map_proxied: u64,
    pub upstream_errors: u64,

    pub kinds: HashMap<CoverKind, KindStats>,
}

/// Simple wall-clock timer
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}
