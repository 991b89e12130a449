//! Entry Cache
//!
//! Cache-aside over a [`CompanyLookup`], one key per uppercased code.
//! Only successful lookups are stored; every error passes through unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::cache_aside::{read_json, write_json};
use super::{normalize_code, CompanyLookup};
use crate::cache::CacheBackend;
use crate::config::CacheSettings;
use crate::error::LookupError;
use crate::models::CompanyRecord;

pub struct EntryCache {
    inner: Arc<dyn CompanyLookup>,
    cache: Arc<dyn CacheBackend>,
    settings: CacheSettings,
}

impl EntryCache {
    /// `settings.key` is the prefix each uppercased code is appended to.
    pub fn new(
        inner: Arc<dyn CompanyLookup>,
        cache: Arc<dyn CacheBackend>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            inner,
            cache,
            settings,
        }
    }

    /// Codes differing only in case share a key.
    pub fn cache_key(&self, code: &str) -> String {
        format!("{}{}", self.settings.key, code.to_uppercase())
    }
}

#[async_trait]
impl CompanyLookup for EntryCache {
    async fn get_by_code(&self, code: &str) -> Result<CompanyRecord, LookupError> {
        // Blank codes must not touch the cache either
        normalize_code(code)?;
        let key = self.cache_key(code);

        if let Some(company) = read_json::<CompanyRecord>(self.cache.as_ref(), &key).await {
            info!("Cache hit for ASX code '{}'", code);
            return Ok(company);
        }

        info!("Cache miss for ASX code '{}'", code);
        let company = self.inner.get_by_code(code).await?;

        if write_json(self.cache.as_ref(), &key, &company, self.settings.ttl).await {
            info!(
                "Cached company with ASX code '{}' for {:?}",
                code, self.settings.ttl
            );
        }

        Ok(company)
    }
}
