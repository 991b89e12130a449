//! Dataset Fetcher
//!
//! Downloads the ASX listed companies CSV and turns it into a [`Dataset`].
//! No caching happens here.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{error, info, warn};

use super::DatasetSource;
use crate::error::{DataSourceError, FetchError};
use crate::models::{CompanyRecord, Dataset};

/// Non-data lines (title banner and a blank line) ahead of the header row
pub const PREAMBLE_LINES: usize = 2;

/// Accepted listing-date formats, tried in order
pub const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%-d/%-m/%Y", "%Y-%m-%d"];

const COMPANY_NAME_COLUMN: &str = "Company name";
const CODE_COLUMN: &str = "ASX code";
const INDUSTRY_COLUMN: &str = "GICS industry group";
const LISTING_DATE_COLUMN: &str = "Listing date";

// == HTTP Dataset Fetcher ==
#[derive(Debug, Clone)]
pub struct HttpDatasetFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpDatasetFetcher {
    /// Builds a fetcher whose every request is bounded by `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn request_failed(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            warn!("Request to fetch ASX company data from {} was cancelled: {}", self.url, err);
            return FetchError::Cancelled;
        }

        error!("Failed to fetch ASX company data from {}: {}", self.url, err);
        DataSourceError::Transport {
            url: self.url.clone(),
            source: err,
        }
        .into()
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetFetcher {
    async fn fetch_all(&self) -> Result<Dataset, FetchError> {
        info!("Fetching ASX company data from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| self.request_failed(err))?;

        let body = response
            .text()
            .await
            .map_err(|err| self.request_failed(err))?;

        let dataset = parse_dataset(&body).map_err(|err| {
            error!("Failed to parse ASX company data: {}", err);
            err
        })?;

        info!("Successfully fetched and parsed {} ASX companies", dataset.len());
        Ok(dataset)
    }
}

// == Parsing ==

/// Column positions resolved from the header row.
#[derive(Debug)]
struct ColumnMap {
    name: usize,
    code: usize,
    industry: Option<usize>,
    listing_date: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, DataSourceError> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(column))
        };
        let require = |column: &str| {
            find(column).ok_or_else(|| DataSourceError::Parse {
                reason: format!("header row has no '{}' column", column),
                source: None,
            })
        };

        Ok(Self {
            name: require(COMPANY_NAME_COLUMN)?,
            code: require(CODE_COLUMN)?,
            industry: find(INDUSTRY_COLUMN),
            listing_date: find(LISTING_DATE_COLUMN),
        })
    }

    /// Missing required fields become empty strings; bad optional ones become `None`.
    fn to_record(&self, row: &StringRecord) -> CompanyRecord {
        let text = |index: usize| field(row, index).unwrap_or_default().to_string();

        CompanyRecord {
            code: text(self.code),
            name: text(self.name),
            industry: self.industry.and_then(|i| field(row, i)).map(str::to_string),
            listing_date: self
                .listing_date
                .and_then(|i| field(row, i))
                .and_then(parse_listing_date),
        }
    }
}

fn field(row: &StringRecord, index: usize) -> Option<&str> {
    row.get(index).map(str::trim).filter(|value| !value.is_empty())
}

/// First matching format wins; no match reads as absent.
pub fn parse_listing_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn skip_preamble(text: &str, lines: usize) -> &str {
    let mut rest = text.trim_start_matches('\u{feff}');
    for _ in 0..lines {
        match rest.find('\n') {
            Some(end) => rest = &rest[end + 1..],
            None => return "",
        }
    }
    rest
}

/// Parses the raw CSV body, preamble included.
///
/// Only an unusable header row fails the whole parse. Individual rows are
/// kept even when fields are missing, and rows the reader cannot decode at
/// all are skipped with a warning.
pub fn parse_dataset(text: &str) -> Result<Dataset, DataSourceError> {
    let body = skip_preamble(text, PREAMBLE_LINES);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| DataSourceError::Parse {
            reason: "unreadable header row".to_string(),
            source: Some(err),
        })?
        .clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut dataset = Dataset::new();
    for (index, row) in reader.records().enumerate() {
        match row {
            Ok(row) => dataset.push(columns.to_record(&row)),
            Err(err) => warn!("Skipping unreadable ASX company row {}: {}", index + 1, err),
        }
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "ASX listed companies as at Fri Oct 16 18:04:21 AEDT 2026\n\
        \n\
        Company name,ASX code,GICS industry group,Listing date\n\
        \"COMMONWEALTH BANK OF AUSTRALIA.\",\"CBA\",\"Banks\",\"12/09/1991\"\n\
        \"BHP GROUP LIMITED\",\"BHP\",\"Materials\",\"1/8/1885\"\n\
        \"WESTPAC BANKING CORPORATION\",\"WBC\",\"Banks\",\"1970-01-02\"\n";

    #[test]
    fn test_parses_sample_list() {
        let dataset = parse_dataset(SAMPLE).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset[0].code, "CBA");
        assert_eq!(dataset[0].name, "COMMONWEALTH BANK OF AUSTRALIA.");
        assert_eq!(dataset[0].industry.as_deref(), Some("Banks"));
        assert_eq!(dataset[0].listing_date, NaiveDate::from_ymd_opt(1991, 9, 12));
        assert_eq!(dataset[1].listing_date, NaiveDate::from_ymd_opt(1885, 8, 1));
        assert_eq!(dataset[2].listing_date, NaiveDate::from_ymd_opt(1970, 1, 2));
    }

    #[test]
    fn test_columns_are_matched_by_name() {
        let text = "banner\n\nasx code , Listing Date,Company Name\nCBA,,Commonwealth Bank\n";
        let dataset = parse_dataset(text).unwrap();

        assert_eq!(dataset, vec![CompanyRecord::new("CBA", "Commonwealth Bank")]);
    }

    #[test]
    fn test_optional_columns_may_be_missing() {
        let text = "banner\n\nCompany name,ASX code\nBHP Group,BHP\n";
        let dataset = parse_dataset(text).unwrap();

        assert_eq!(dataset[0].industry, None);
        assert_eq!(dataset[0].listing_date, None);
    }

    #[test]
    fn test_malformed_fields_are_left_absent() {
        let text = "banner\n\n\
            Company name,ASX code,GICS industry group,Listing date\n\
            Short Row Ltd,SRL\n\
            Bad Date Ltd,BDL,Energy,sometime in 1999\n\
            ,NMC,,\n";
        let dataset = parse_dataset(text).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset[0], CompanyRecord::new("SRL", "Short Row Ltd"));
        assert_eq!(dataset[1].industry.as_deref(), Some("Energy"));
        assert_eq!(dataset[1].listing_date, None);
        assert_eq!(dataset[2].name, "");
        assert_eq!(dataset[2].code, "NMC");
    }

    #[test]
    fn test_missing_required_column_is_total_failure() {
        let text = "banner\n\nCompany name,Ticker\nCommonwealth Bank,CBA\n";
        let err = parse_dataset(text).unwrap_err();

        assert!(matches!(err, DataSourceError::Parse { .. }));
        assert!(err.to_string().contains("ASX code"));
    }

    #[test]
    fn test_empty_body_is_total_failure() {
        assert!(parse_dataset("").is_err());
        assert!(parse_dataset("only a banner\n").is_err());
    }

    #[test]
    fn test_header_only_yields_empty_dataset() {
        let text = "banner\n\nCompany name,ASX code\n";
        assert!(parse_dataset(text).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_codes_keep_upstream_order() {
        let text = "banner\n\nCompany name,ASX code\nFirst,DUP\nSecond,DUP\n";
        let dataset = parse_dataset(text).unwrap();

        assert_eq!(dataset[0].name, "First");
        assert_eq!(dataset[1].name, "Second");
    }

    #[test]
    fn test_date_formats_in_order() {
        assert_eq!(parse_listing_date("05/03/2001"), NaiveDate::from_ymd_opt(2001, 3, 5));
        assert_eq!(parse_listing_date("5/3/2001"), NaiveDate::from_ymd_opt(2001, 3, 5));
        assert_eq!(parse_listing_date("2001-03-05"), NaiveDate::from_ymd_opt(2001, 3, 5));
        assert_eq!(parse_listing_date("31/02/2001"), None);
        assert_eq!(parse_listing_date("March 2001"), None);
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let text = format!("\u{feff}{}", SAMPLE);
        assert_eq!(parse_dataset(&text).unwrap().len(), 3);
    }
}
