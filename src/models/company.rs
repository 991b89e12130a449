//! Company domain model
//!
//! The record shape shared by the fetcher, both caches and the lookup path.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// == Company Record ==
/// One listed company.
///
/// Also the cache payload shape: every field, absent optionals included,
/// survives a serde_json round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// ASX ticker code, uppercase in the upstream list
    pub code: String,
    pub name: String,
    /// GICS industry group
    pub industry: Option<String>,
    pub listing_date: Option<NaiveDate>,
}

impl CompanyRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            industry: None,
            listing_date: None,
        }
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_listing_date(mut self, date: NaiveDate) -> Self {
        self.listing_date = Some(date);
        self
    }
}

/// The full company list in upstream order. Lookups take the first match.
pub type Dataset = Vec<CompanyRecord>;
