//! Cache adapter for HTTP response caching
//!
//! In-memory store of serialized responses keyed by request path. Every entry
//! shares the same TTL; there is no size bound and no explicit invalidation,
//! expired entries are dropped on lookup and by a periodic sweep.

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Cache entry for HTTP responses
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Cache key
    pub key: String,
    /// HTTP status code
    pub status: u16,
    /// Content type
    pub content_type: String,
    /// Response body
    pub data: Bytes,
    /// When the entry was stored
    pub stored_at: Instant,
}

impl CacheEntry {
    /// Create an entry stamped with the current time
    pub fn new(key: String, status: u16, content_type: String, data: Bytes) -> Self {
        Self {
            key,
            status,
            content_type,
            data,
            stored_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.duration_since(self.stored_at) >= ttl
    }
}

/// Shared in-memory response store
#[derive(Debug)]
pub struct CacheAdapter {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl CacheAdapter {
    /// Create a new cache adapter with a global TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Get a live cached response
    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(self.ttl, now) => {
                    debug!(key = %key, "Memory cache hit");
                    return Some(entry.clone());
                }
                Some(_) => {}
                None => {
                    debug!(key = %key, "Memory cache miss");
                    return None;
                }
            }
        }

        // Expired: drop it unless it was refreshed in the meantime
        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(self.ttl, Instant::now()))
        {
            entries.remove(key);
            debug!(key = %key, "Memory cache entry expired");
        }
        None
    }

    /// Store a response, replacing any previous entry for the key
    pub async fn set(&self, entry: CacheEntry) {
        let mut entries = self.entries.write().await;
        debug!(key = %entry.key, bytes = entry.data.len(), "Cached response in memory");
        entries.insert(entry.key.clone(), entry);
    }

    /// Remove every expired entry, returning how many were dropped
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl, now));
        before - entries.len()
    }

    /// Number of stored entries, expired or not
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Sweep expired entries every TTL until the adapter is dropped
    pub fn spawn_janitor(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let weak: Weak<Self> = Arc::downgrade(self);
        let period = self.ttl;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                let Some(cache) = weak.upgrade() else {
                    break;
                };
                let removed = cache.purge_expired().await;
                if removed > 0 {
                    debug!(removed = removed, "Purged expired cache entries");
                }
            }
        })
    }
}
