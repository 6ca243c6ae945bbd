//! Storage for cover-service.
//!
//! Rendered covers (and proxied map images) are kept on local disk, one PNG
//! file per parameter combination.

pub mod cache;

pub use cache::{CacheKey, CacheStats, DiskCache, KindStats};
