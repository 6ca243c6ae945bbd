//! Disk cache for rendered cover images.
//!
//! Layout: `{root}/{kind}/{part1}.{part2}….png`. Files are never evicted;
//! a missing file simply means the cover is rendered again.

use bytes::Bytes;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cover_common::{CoverError, CoverResult};

/// Longest key part kept verbatim. Longer parts are hashed.
const MAX_PLAIN_PART_LEN: usize = 64;

/// Marks a hashed part. Plain parts never contain it, so a hashed name can
/// not be requested directly.
const HASHED_PREFIX: char = '~';

/// Prefix of in-flight temp files; skipped by `stats`.
const TMP_PREFIX: &str = ".tmp-";

/// Cache key for a cover: a kind directory plus normalized parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: String,
    pub parts: Vec<String>,
}

impl CacheKey {
    pub fn new<I, S>(kind: impl Into<String>, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: kind.into(),
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// File name within the kind directory.
    pub fn file_name(&self) -> String {
        let stem = self
            .parts
            .iter()
            .map(|p| file_safe_part(p))
            .collect::<Vec<_>>()
            .join(".");
        format!("{}.png", stem)
    }

    /// Path relative to the cache root.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(file_safe_part(&self.kind)).join(self.file_name())
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", file_safe_part(&self.kind), self.file_name())
    }
}

/// Parts made of `[a-z0-9_-]` are used as-is; anything else (text, FEN,
/// uppercase, path separators) is replaced by `~` and its SHA-256 in hex.
fn file_safe_part(part: &str) -> String {
    let plain = !part.is_empty()
        && part.len() <= MAX_PLAIN_PART_LEN
        && part
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
    if plain {
        part.to_string()
    } else {
        format!("{}{}", HASHED_PREFIX, hex::encode(Sha256::digest(part.as_bytes())))
    }
}

/// Per-kind file statistics.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct KindStats {
    pub files: u64,
    pub bytes: u64,
}

/// Cache statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    pub root: String,
    pub total_files: u64,
    pub total_bytes: u64,
    pub kinds: BTreeMap<String, KindStats>,
}

/// On-disk PNG cache.
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    /// Open (creating if needed) a cache rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> CoverResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|e| {
            CoverError::CacheError(format!("cannot create {}: {}", root.display(), e))
        })?;
        tracing::info!(root = %root.display(), "Opened disk cache");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the file backing `key`.
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    /// Read a cached image. A missing file is a miss, not an error.
    pub async fn get(&self, key: &CacheKey) -> CoverResult<Option<Bytes>> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(data) => {
                tracing::debug!(key = %key, bytes = data.len(), "Cache hit");
                Ok(Some(Bytes::from(data)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoverError::CacheError(format!(
                "read {} failed: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Store an image. The file appears atomically: concurrent readers see
    /// either nothing or the complete PNG.
    pub async fn put(&self, key: &CacheKey, data: &[u8]) -> CoverResult<()> {
        let path = self.path_for(key);
        let dir = path
            .parent()
            .ok_or_else(|| CoverError::CacheError(format!("{} has no parent", path.display())))?;
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| CoverError::CacheError(format!("mkdir {} failed: {}", dir.display(), e)))?;

        let tmp = dir.join(format!("{}{}", TMP_PREFIX, uuid::Uuid::new_v4()));
        if let Err(e) = tokio::fs::write(&tmp, data).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(CoverError::CacheError(format!(
                "write {} failed: {}",
                tmp.display(),
                e
            )));
        }
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(CoverError::CacheError(format!(
                "rename to {} failed: {}",
                path.display(),
                e
            )));
        }

        tracing::debug!(key = %key, bytes = data.len(), "Cached image");
        Ok(())
    }

    /// Check if a key has a cached file.
    pub async fn exists(&self, key: &CacheKey) -> bool {
        tokio::fs::metadata(self.path_for(key))
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// Walk the cache directory and count files and bytes per kind.
    pub async fn stats(&self) -> CoverResult<CacheStats> {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || collect_stats(&root))
            .await
            .map_err(|e| CoverError::InternalError(format!("stats task failed: {}", e)))
    }
}

fn collect_stats(root: &Path) -> CacheStats {
    let mut stats = CacheStats {
        root: root.display().to_string(),
        ..CacheStats::default()
    };

    for entry in walkdir::WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with(TMP_PREFIX) {
            continue;
        }
        let Some(kind) = entry
            .path()
            .parent()
            .and_then(Path::file_name)
            .map(|k| k.to_string_lossy().into_owned())
        else {
            continue;
        };
        let bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);

        let kind_stats = stats.kinds.entry(kind).or_default();
        kind_stats.files += 1;
        kind_stats.bytes += bytes;
        stats.total_files += 1;
        stats.total_bytes += bytes;
    }

    stats
}
