//! Cache Backend Module
//!
//! The get/set protocol the pipeline caches speak, and the in-process
//! implementation of it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::error::CacheError;

// == Cache Backend ==
/// A shared key/value cache with absolute per-key TTL.
///
/// Implementations only guarantee atomicity of a single `get` or `set`.
/// Nothing spans a read followed by a write.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the payload under `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Stores `value` under `key` for `ttl` measured from now.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;
}

// == Memory Cache ==
/// [`CacheBackend`] over a locked [`CacheStore`].
///
/// Cloning shares the same store.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Handle to the underlying store, for the cleanup task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        self.store.clone()
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        // Write lock: reads update LRU order and counters
        let mut store = self.store.write().await;
        Ok(store.get(key))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.set(key.to_string(), value, ttl)
    }
}
