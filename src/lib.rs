//! Open Markets - ASX company lookup service
//!
//! Resolves ASX ticker codes to company records, fronting the ASX listed
//! companies CSV with a dataset-level and a per-code cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
