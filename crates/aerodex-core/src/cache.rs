//! Bounded in-memory cache for lookup responses.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

#[derive(Debug)]
struct CacheInner<K, V> {
    map: HashMap<K, CacheEntry<V>>,
    max_entries: usize,
    expire_after_write: Duration,
}

impl<K, V> CacheInner<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn new(max_entries: usize, expire_after_write: Duration) -> Self {
        Self {
            map: HashMap::new(),
            max_entries,
            expire_after_write,
        }
    }

    fn is_fresh(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        now.duration_since(entry.inserted_at) < self.expire_after_write
    }

    fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        self.map
            .get(key)
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| entry.value.clone())
    }

    fn put(&mut self, key: K, value: V) {
        self.map.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );

        if self.map.len() > self.max_entries {
            self.clear_expired();
        }
        while self.map.len() > self.max_entries {
            let oldest = self
                .map
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    self.map.remove(&key);
                }
                None => break,
            }
        }
    }

    fn clear_expired(&mut self) {
        let now = Instant::now();
        let ttl = self.expire_after_write;
        self.map
            .retain(|_, entry| now.duration_since(entry.inserted_at) < ttl);
    }

    fn is_disabled(&self) -> bool {
        self.max_entries == 0 || self.expire_after_write == Duration::ZERO
    }
}

/// Thread-safe write-expiring cache.
///
/// Entries expire a fixed time after they were written; reads never extend
/// that. Once `max_entries` is exceeded the oldest write is evicted first.
/// Cloning the store shares the underlying map.
#[derive(Debug, Clone)]
pub struct CacheStore<K, V> {
    inner: Arc<tokio::sync::RwLock<CacheInner<K, V>>>,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(max_entries: usize, expire_after_write: Duration) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(CacheInner::new(
                max_entries,
                expire_after_write,
            ))),
        }
    }

    /// Create a disabled cache; every lookup misses.
    pub fn disabled() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Get a cached value for the given key if it exists and hasn't expired.
    pub async fn get(&self, key: &K) -> Option<V> {
        let store = self.inner.read().await;
        store.get(key)
    }

    /// Put a value into the cache, replacing any previous entry for the key.
    ///
    /// If the cache is disabled this is a no-op.
    pub async fn put(&self, key: K, value: V) {
        let mut store = self.inner.write().await;

        if store.is_disabled() {
            return;
        }

        store.put(key, value);
    }

    /// Remove expired entries from the cache.
    pub async fn clear_expired(&self) {
        let mut store = self.inner.write().await;
        store.clear_expired();
    }

    /// Clear all entries from the cache.
    pub async fn clear(&self) {
        let mut store = self.inner.write().await;
        store.map.clear();
    }

    /// Get the number of entries in the cache (including expired entries).
    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Check if the cache is disabled (zero capacity or zero TTL).
    pub async fn is_disabled(&self) -> bool {
        let store = self.inner.read().await;
        store.is_disabled()
    }
}
