//! Domain records and HTTP DTOs

pub mod company;
pub mod responses;

pub use company::{CompanyRecord, Dataset};
pub use responses::{CompanyResponse, ErrorResponse, HealthResponse, StatsResponse};
