//! Read and write halves of cache-aside, shared by both cache stages.
//!
//! Neither half can fail from the caller's point of view: backend errors
//! and undecodable payloads are logged and read as a miss or a skipped
//! write.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::cache::CacheBackend;

/// Reads and decodes the payload under `key`, or `None` on any failure.
pub(crate) async fn read_json<T: DeserializeOwned>(
    cache: &dyn CacheBackend,
    key: &str,
) -> Option<T> {
    let bytes = match cache.get(key).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(err) => {
            warn!("Cache read failed for '{}': {}", key, err);
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("Failed to deserialize cached payload for '{}': {}", key, err);
            None
        }
    }
}

/// Encodes `value` and stores it under `key`. Returns whether it was stored.
pub(crate) async fn write_json<T: Serialize + ?Sized>(
    cache: &dyn CacheBackend,
    key: &str,
    value: &T,
    ttl: Duration,
) -> bool {
    let bytes = match serde_json::to_vec(value) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("Failed to serialize payload for '{}': {}", key, err);
            return false;
        }
    };

    match cache.set(key, bytes, ttl).await {
        Ok(()) => true,
        Err(err) => {
            warn!("Cache write failed for '{}': {}", key, err);
            false
        }
    }
}
