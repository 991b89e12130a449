//! Cache Module
//!
//! Shared byte cache used by both pipeline cache stages, with absolute TTL
//! and LRU eviction.

mod backend;
mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

pub use backend::{CacheBackend, MemoryCache};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed payload size in bytes; the full company list is a few hundred KiB
pub const MAX_VALUE_SIZE: usize = 16 * 1024 * 1024;
