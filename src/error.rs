//! Error types for the lookup service
//!
//! Each pipeline stage returns one of these explicitly; causes are kept as
//! `source()` chains for logging.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Data Source Error ==
/// Failure to obtain or parse the upstream company list.
#[derive(Error, Debug)]
pub enum DataSourceError {
    /// Connection, TLS, non-success status or body read failure
    #[error("Unable to fetch company data from {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The payload could not be read as a company list at all
    #[error("Unable to parse company data: {reason}")]
    Parse {
        reason: String,
        #[source]
        source: Option<csv::Error>,
    },
}

// == Fetch Error ==
/// Outcome of a failed dataset fetch, cached or not.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    /// Aborted by a timeout before the payload was complete
    #[error("Company data request was cancelled")]
    Cancelled,
}

// == Lookup Error ==
/// Error taxonomy of a single code lookup.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("{0}")]
    InvalidArgument(String),

    /// Carries the code exactly as the caller supplied it
    #[error("Company with ASX code '{0}' was not found.")]
    NotFound(String),

    #[error("Unable to retrieve ASX company data.")]
    DataUnavailable(#[source] FetchError),

    #[error("The request was cancelled.")]
    Cancelled,
}

impl LookupError {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::InvalidArgument(_) => "invalid_argument",
            LookupError::NotFound(_) => "not_found",
            LookupError::DataUnavailable(_) => "data_unavailable",
            LookupError::Cancelled => "cancelled",
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        let (status, body) = match &self {
            LookupError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, json!({ "message": message })),
            LookupError::NotFound(code) => (
                StatusCode::NOT_FOUND,
                json!({ "message": message, "code": code }),
            ),
            LookupError::DataUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, json!({ "message": message }))
            }
            LookupError::Cancelled => (StatusCode::GATEWAY_TIMEOUT, json!({ "message": message })),
        };

        (status, Json(body)).into_response()
    }
}

// == Cache Error ==
/// Rejections from the cache backend. The pipeline logs these and carries on.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Invalid cache request: {0}")]
    InvalidRequest(String),

    #[error("Cache full: {0}")]
    CacheFull(String),
}

// == Result Type Alias ==
pub type Result<T> = std::result::Result<T, LookupError>;
