//! API Handlers
//!
//! HTTP request handlers and the shared application state.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use tracing::{error, info, warn};

use super::auth::ApiClient;
use crate::cache::{CacheBackend, MemoryCache};
use crate::config::{ApiKeyEntry, Config};
use crate::error::{LookupError, Result};
use crate::models::{CompanyResponse, HealthResponse, StatsResponse};
use crate::pipeline::{
    CompanyLookup, DatasetCache, DatasetSource, EntryCache, HttpDatasetFetcher, LookupService,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Top of the lookup pipeline
    pub lookup: Arc<dyn CompanyLookup>,
    /// Backend shared by both cache stages
    pub cache: MemoryCache,
    pub api_keys: Arc<Vec<ApiKeyEntry>>,
}

impl AppState {
    pub fn new(
        lookup: Arc<dyn CompanyLookup>,
        cache: MemoryCache,
        api_keys: Vec<ApiKeyEntry>,
    ) -> Self {
        Self {
            lookup,
            cache,
            api_keys: Arc::new(api_keys),
        }
    }

    /// Composition root: wires fetcher, dataset cache, lookup service and
    /// entry cache over one shared cache backend.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cache = MemoryCache::new(config.cache_max_entries);
        let backend: Arc<dyn CacheBackend> = Arc::new(cache.clone());

        let fetcher: Arc<dyn DatasetSource> = Arc::new(HttpDatasetFetcher::new(
            config.dataset_url.clone(),
            config.fetch_timeout,
        )?);
        let dataset_cache: Arc<dyn DatasetSource> = Arc::new(DatasetCache::new(
            fetcher,
            backend.clone(),
            config.dataset_cache.clone(),
        ));
        let service: Arc<dyn CompanyLookup> = Arc::new(LookupService::new(dataset_cache));
        let lookup = Arc::new(EntryCache::new(
            service,
            backend,
            config.entry_cache.clone(),
        ));

        Ok(Self::new(lookup, cache, config.api_keys.clone()))
    }
}

/// Handler for GET /api/companies/:code
pub async fn get_company_handler(
    State(state): State<AppState>,
    Extension(client): Extension<ApiClient>,
    Path(code): Path<String>,
) -> Result<Json<CompanyResponse>> {
    info!("Company lookup for '{}' from client {}", code, client.name);

    match state.lookup.get_by_code(&code).await {
        Ok(company) => Ok(Json(company.into())),
        Err(err) => {
            match &err {
                LookupError::NotFound(_) | LookupError::InvalidArgument(_) => {
                    warn!("Lookup for '{}' failed ({}): {}", code, err.kind(), err)
                }
                LookupError::DataUnavailable(cause) => {
                    error!("ASX data unavailable for request '{}': {}", code, cause)
                }
                LookupError::Cancelled => warn!("Lookup for '{}' was cancelled", code),
            }
            Err(err)
        }
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
