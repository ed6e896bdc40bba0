//! Cache seam for precomputed forecast reports.
//!
//! The engine only needs a blocking get/set over serialized reports; expiry
//! and storage belong to the implementation behind [`ForecastCache`].

use crate::data::Granularity;
use crate::error::{ForecastError, Result};
use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Identity of a cached forecast: which series, which branch, which cadence
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Series source, e.g. `sales`
    pub source: String,
    /// Branch name, `None` for the all-branches view
    pub branch: Option<String>,
    pub granularity: Granularity,
}

impl CacheKey {
    pub fn new(source: impl Into<String>, branch: Option<&str>, granularity: Granularity) -> Self {
        Self {
            source: source.into(),
            branch: branch.map(str::to_string),
            granularity,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.source,
            self.branch.as_deref().unwrap_or("all"),
            self.granularity
        )
    }
}

/// Blocking key-value store holding serialized forecast reports
pub trait ForecastCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: String) -> Result<()>;
}

/// Process-local cache keeping the most recently used reports
#[derive(Debug)]
pub struct InMemoryCache {
    entries: Mutex<LruCache<String, String>>,
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl InMemoryCache {
    /// Branches x sources x granularities of a typical deployment, with headroom
    pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
        Some(capacity) => capacity,
        None => NonZeroUsize::MIN,
    };

    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            ForecastError::InvalidParameter("Cache capacity must be at least 1".to_string())
        })?;
        Ok(Self::with_capacity(capacity))
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn capacity(&self) -> Result<usize> {
        Ok(self.lock()?.cap().get())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, LruCache<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| ForecastError::Cache("forecast cache lock poisoned".to_string()))
    }
}

impl ForecastCache for InMemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        if let Some((evicted, _)) = self.lock()?.push(key.to_string(), value) {
            if evicted != key {
                debug!(key = %evicted, "evicted least recently used forecast");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_rendering() {
        let branch = CacheKey::new("sales", Some("Branch1"), Granularity::Weekly);
        let all = CacheKey::new("sales", None, Granularity::Monthly);

        assert_eq!(branch.to_string(), "sales:Branch1:weekly");
        assert_eq!(all.to_string(), "sales:all:monthly");
    }

    #[test]
    fn test_in_memory_cache() {
        let cache = InMemoryCache::default();
        assert!(cache.is_empty().unwrap());
        assert_eq!(cache.get("k").unwrap(), None);

        cache.set("k", "v1".to_string()).unwrap();
        cache.set("k", "v2".to_string()).unwrap();

        assert_eq!(cache.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(cache.len().unwrap(), 1);
        assert_eq!(cache.capacity().unwrap(), 256);
    }

    #[test]
    fn test_cache_is_bounded() {
        let cache = InMemoryCache::new(100).unwrap();
        for i in 0..10_000 {
            let branch = format!("Branch{}", i);
            let key = CacheKey::new("sales", Some(branch.as_str()), Granularity::Daily);
            cache.set(&key.to_string(), i.to_string()).unwrap();
        }

        assert_eq!(cache.len().unwrap(), 100);
        assert_eq!(cache.get("sales:Branch0:daily").unwrap(), None);
        assert_eq!(
            cache.get("sales:Branch9999:daily").unwrap().as_deref(),
            Some("9999")
        );
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let cache = InMemoryCache::new(2).unwrap();
        cache.set("a", "1".to_string()).unwrap();
        cache.set("b", "2".to_string()).unwrap();

        // Reading "a" makes "b" the eviction candidate
        cache.get("a").unwrap();
        cache.set("c", "3".to_string()).unwrap();

        assert_eq!(cache.get("b").unwrap(), None);
        assert_eq!(cache.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            InMemoryCache::new(0),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let cache = std::sync::Arc::new(InMemoryCache::default());
        let poisoner = std::sync::Arc::clone(&cache);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.entries.lock().unwrap();
            panic!("writer crashed");
        })
        .join();

        assert!(matches!(cache.get("k"), Err(ForecastError::Cache(_))));
        assert!(matches!(
            cache.set("k", "v".to_string()),
            Err(ForecastError::Cache(_))
        ));
        assert!(cache.len().is_err());
    }
}
