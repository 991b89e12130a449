//! Lookup Service
//!
//! Resolves a code against the dataset and produces the lookup error
//! taxonomy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use super::{CompanyLookup, DatasetSource};
use crate::error::{FetchError, LookupError};
use crate::models::CompanyRecord;

/// Rejects blank codes and returns the uppercase form used for matching and
/// cache keys.
pub fn normalize_code(code: &str) -> Result<String, LookupError> {
    if code.trim().is_empty() {
        return Err(LookupError::InvalidArgument(
            "ASX code cannot be null or empty.".to_string(),
        ));
    }
    Ok(code.to_uppercase())
}

pub struct LookupService {
    source: Arc<dyn DatasetSource>,
}

impl LookupService {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl CompanyLookup for LookupService {
    async fn get_by_code(&self, code: &str) -> Result<CompanyRecord, LookupError> {
        let normalized = normalize_code(code)?;

        let dataset = match self.source.fetch_all().await {
            Ok(dataset) => dataset,
            Err(FetchError::Cancelled) => {
                warn!("Lookup for ASX code '{}' was cancelled", code);
                return Err(LookupError::Cancelled);
            }
            Err(err) => {
                error!("Failed to retrieve ASX company data: {}", err);
                return Err(LookupError::DataUnavailable(err));
            }
        };

        // First match wins when upstream repeats a code
        match dataset
            .into_iter()
            .find(|company| company.code.to_uppercase() == normalized)
        {
            Some(company) => {
                info!("Successfully retrieved company with ASX code '{}'", code);
                Ok(company)
            }
            None => {
                warn!("Company with ASX code '{}' not found", code);
                Err(LookupError::NotFound(code.to_string()))
            }
        }
    }
}
