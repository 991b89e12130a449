//! Dataset Cache
//!
//! Cache-aside over a [`DatasetSource`], storing the whole company list
//! under one key.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::cache_aside::{read_json, write_json};
use super::DatasetSource;
use crate::cache::CacheBackend;
use crate::config::CacheSettings;
use crate::error::FetchError;
use crate::models::Dataset;

pub struct DatasetCache {
    inner: Arc<dyn DatasetSource>,
    cache: Arc<dyn CacheBackend>,
    settings: CacheSettings,
}

impl DatasetCache {
    /// `settings.key` is the single key the list is stored under.
    pub fn new(
        inner: Arc<dyn DatasetSource>,
        cache: Arc<dyn CacheBackend>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            inner,
            cache,
            settings,
        }
    }

    pub fn cache_key(&self) -> &str {
        &self.settings.key
    }
}

#[async_trait]
impl DatasetSource for DatasetCache {
    /// An empty cached list counts as a miss. Upstream errors pass through
    /// untouched and nothing is written for them.
    async fn fetch_all(&self) -> Result<Dataset, FetchError> {
        let key = self.cache_key();

        if let Some(cached) = read_json::<Dataset>(self.cache.as_ref(), key).await {
            if !cached.is_empty() {
                info!("Cache hit: Retrieved {} companies from cache", cached.len());
                return Ok(cached);
            }
        }

        info!("Cache miss: Fetching company list from ASX");
        let dataset = self.inner.fetch_all().await?;

        if write_json(self.cache.as_ref(), key, &dataset, self.settings.ttl).await {
            info!(
                "Cached {} companies for {:?}",
                dataset.len(),
                self.settings.ttl
            );
        }

        Ok(dataset)
    }
}
