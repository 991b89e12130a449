//! API Module
//!
//! HTTP surface over the lookup pipeline.
//!
//! # Endpoints
//! - `GET /api/companies/:code` - Look up a company by ASX code (API key)
//! - `GET /stats` - Cache statistics (API key)
//! - `GET /health` - Health check endpoint

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{ApiClient, API_KEY_HEADER};
pub use handlers::*;
pub use routes::create_router;
