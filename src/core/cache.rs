//! Two-tier caching: in-memory LRU in front of optional JSON files on disk
//!
//! - L1: LRU memory cache, lives for one render pass
//! - L2: one JSON file per key under a cache directory; only consulted when
//!   the caller opts in, and wiped by an explicit refresh

use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    hash::Hash,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Generic cache key that can be used for both memory and disk caching
pub trait CacheKey: Hash + Eq + Clone {
    /// String form used as the file name on disk
    fn to_file_key(&self) -> String;

    fn to_file_path(&self, dir: &Path) -> PathBuf {
        let safe: String = self
            .to_file_key()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        dir.join(format!("{}.json", safe))
    }
}

/// Where a cached value was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
    Memory,
    Disk,
}

/// LRU memory cache with an optional persistent layer
pub struct UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    memory_cache: LruCache<K, V>,
    memory_capacity: usize,
    disk_dir: Option<PathBuf>,
}

impl<K, V> UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    /// Memory-only cache
    pub fn new(memory_capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(memory_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            memory_cache: LruCache::new(capacity),
            memory_capacity: capacity.get(),
            disk_dir: None,
        }
    }

    /// Memory cache backed by JSON files in `dir`
    pub fn with_disk(memory_capacity: usize, dir: impl Into<PathBuf>) -> Self {
        let mut cache = Self::new(memory_capacity);
        cache.disk_dir = Some(dir.into());
        cache
    }

    pub fn disk_dir(&self) -> Option<&Path> {
        self.disk_dir.as_deref()
    }

    /// Get an item from cache (checks memory first, then disk)
    pub fn get(&mut self, key: &K) -> Option<(V, CacheSource)> {
        if let Some(value) = self.memory_cache.get(key) {
            return Some((value.clone(), CacheSource::Memory));
        }

        let value = self.get_from_disk(key)?;
        // Promote to memory cache
        self.memory_cache.put(key.clone(), value.clone());
        Some((value, CacheSource::Disk))
    }

    /// Put an item into cache (memory, and disk when enabled)
    pub fn put(&mut self, key: K, value: V) {
        if let Err(e) = self.put_to_disk(&key, &value) {
            debug!("could not persist cache entry {}: {}", key.to_file_key(), e);
        }
        self.memory_cache.put(key, value);
    }

    fn get_from_disk(&self, key: &K) -> Option<V> {
        let path = key.to_file_path(self.disk_dir.as_deref()?);
        let content = try_read_to_string(&path)?;
        serde_json::from_str(&content).ok()
    }

    fn put_to_disk(&self, key: &K, value: &V) -> std::io::Result<()> {
        let Some(dir) = self.disk_dir.as_deref() else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_string(&key.to_file_path(dir), &content)
    }

    /// Clear memory cache only (keeps disk cache)
    pub fn clear_memory(&mut self) {
        self.memory_cache.clear();
    }

    /// Remove every persisted entry; returns how many files were deleted
    pub fn clear_disk(&mut self) -> std::io::Result<usize> {
        let Some(dir) = self.disk_dir.as_deref() else {
            return Ok(0);
        };
        if !dir.exists() {
            return Ok(0);
        }
        let mut removed = 0;
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Get memory cache statistics
    pub fn memory_stats(&self) -> (usize, usize) {
        (self.memory_cache.len(), self.memory_capacity)
    }
}
