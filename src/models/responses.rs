//! Response DTOs for the lookup API
//!
//! Outgoing HTTP bodies. Lookup error bodies are built in `error.rs`.

use chrono::NaiveDate;
use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::CompanyRecord;

/// Body of `GET /api/companies/:code`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub asx_code: String,
    pub company_name: String,
    pub listing_date: Option<NaiveDate>,
    pub gics_industry: Option<String>,
}

impl From<CompanyRecord> for CompanyResponse {
    fn from(record: CompanyRecord) -> Self {
        Self {
            asx_code: record.code,
            company_name: record.name,
            listing_date: record.listing_date,
            gics_industry: record.industry,
        }
    }
}

/// Body of `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    pub evictions: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            writes: stats.writes,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Body of authentication failures
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
