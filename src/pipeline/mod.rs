//! Lookup Pipeline
//!
//! Four stages, each implementing one of two capabilities:
//!
//! ```text
//! EntryCache -> LookupService -> DatasetCache -> HttpDatasetFetcher
//! (CompanyLookup)  (CompanyLookup)  (DatasetSource)  (DatasetSource)
//! ```
//!
//! Stages hold their inner stage as a trait object and are wired once, in
//! [`AppState::from_config`](crate::api::AppState::from_config).
//!
//! Cancellation follows future semantics: dropping a lookup aborts the
//! in-flight request at its next `.await`. Cache writes only happen after
//! a complete, successful inner call, so an aborted lookup writes nothing.
//! Concurrent misses on the same key are not coalesced; each one reaches
//! upstream and the last write wins.

mod cache_aside;
mod dataset_cache;
mod entry_cache;
mod fetcher;
mod lookup;

#[cfg(test)]
pub(crate) mod testing;

pub use dataset_cache::DatasetCache;
pub use entry_cache::EntryCache;
pub use fetcher::{parse_dataset, HttpDatasetFetcher, DATE_FORMATS, PREAMBLE_LINES};
pub use lookup::{normalize_code, LookupService};

use async_trait::async_trait;

use crate::error::{FetchError, LookupError};
use crate::models::{CompanyRecord, Dataset};

// == Dataset Source ==
/// Produces the full company list.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Dataset, FetchError>;
}

// == Company Lookup ==
/// Resolves one ASX code to its company record.
#[async_trait]
pub trait CompanyLookup: Send + Sync {
    async fn get_by_code(&self, code: &str) -> Result<CompanyRecord, LookupError>;
}
