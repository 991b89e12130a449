//! Hand-rolled stage doubles for pipeline unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{CompanyLookup, DatasetSource};
use crate::error::{DataSourceError, FetchError, LookupError};
use crate::models::{CompanyRecord, Dataset};

pub(crate) fn sample_dataset() -> Dataset {
    vec![
        CompanyRecord::new("CBA", "Commonwealth Bank").with_industry("Banks"),
        CompanyRecord::new("BHP", "BHP Group").with_industry("Materials"),
    ]
}

/// Returns a fixed dataset, optionally after a delay, counting calls.
pub(crate) struct StaticSource {
    dataset: Dataset,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StaticSource {
    pub(crate) fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatasetSource for StaticSource {
    async fn fetch_all(&self) -> Result<Dataset, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.dataset.clone())
    }
}

/// Always fails with the configured error.
pub(crate) struct FailingSource {
    reason: Option<String>,
}

impl FailingSource {
    pub(crate) fn parse(reason: &str) -> Self {
        Self {
            reason: Some(reason.to_string()),
        }
    }

    pub(crate) fn cancelled() -> Self {
        Self { reason: None }
    }
}

#[async_trait]
impl DatasetSource for FailingSource {
    async fn fetch_all(&self) -> Result<Dataset, FetchError> {
        match &self.reason {
            Some(reason) => Err(DataSourceError::Parse {
                reason: reason.clone(),
                source: None,
            }
            .into()),
            None => Err(FetchError::Cancelled),
        }
    }
}

/// Forwards to another lookup, recording every code it is asked for.
pub(crate) struct CountingLookup {
    inner: Arc<dyn CompanyLookup>,
    calls: AtomicUsize,
    last_code: std::sync::Mutex<Option<String>>,
}

impl CountingLookup {
    pub(crate) fn new(inner: Arc<dyn CompanyLookup>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            last_code: std::sync::Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_code(&self) -> Option<String> {
        self.last_code.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompanyLookup for CountingLookup {
    async fn get_by_code(&self, code: &str) -> Result<CompanyRecord, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_code.lock().unwrap() = Some(code.to_string());
        self.inner.get_by_code(code).await
    }
}
