//! In-memory report store for tests.

use super::{ReportStore, ReportStoreError};
use crate::domain::{ObservationWithBalance, PairKey, UnixTime};
use crate::engine::max_by_pair;
use async_trait::async_trait;
use std::collections::HashMap;

/// Report store serving a fixed batch.
#[derive(Debug, Clone, Default)]
pub struct MockReportStore {
    reports: Vec<ObservationWithBalance>,
    max_by_pair: Option<HashMap<PairKey, UnixTime>>,
    failure: Option<String>,
}

impl MockReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add reports to the batch returned by `get_daily`.
    pub fn with_reports(mut self, reports: Vec<ObservationWithBalance>) -> Self {
        self.reports.extend(reports);
        self
    }

    /// Override the per-pair index. Defaults to the index of the batch.
    pub fn with_max_by_pair(mut self, index: HashMap<PairKey, UnixTime>) -> Self {
        self.max_by_pair = Some(index);
        self
    }

    /// Make every call fail with `ReportStoreError::Unavailable`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    fn check(&self) -> Result<(), ReportStoreError> {
        match &self.failure {
            Some(message) => Err(ReportStoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ReportStore for MockReportStore {
    async fn get_daily(&self) -> Result<Vec<ObservationWithBalance>, ReportStoreError> {
        self.check()?;
        let mut reports = self.reports.clone();
        reports.sort_by_key(|r| r.observation.timestamp);
        Ok(reports)
    }

    async fn get_max_by_pair(&self) -> Result<HashMap<PairKey, UnixTime>, ReportStoreError> {
        self.check()?;
        Ok(self
            .max_by_pair
            .clone()
            .unwrap_or_else(|| max_by_pair(&self.reports)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{address, report, START};

    #[tokio::test]
    async fn test_mock_orders_by_timestamp() {
        let store = MockReportStore::new().with_reports(vec![
            report(2, START, address(0x1), "dai"),
            report(1, START - 86_400, address(0x1), "dai"),
        ]);

        let reports = store.get_daily().await.unwrap();
        assert_eq!(reports[0].observation.block_number, 1);
        assert_eq!(reports[1].observation.block_number, 2);

        let index = store.get_max_by_pair().await.unwrap();
        assert_eq!(index.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let store = MockReportStore::new().failing("down");
        assert!(matches!(
            store.get_daily().await,
            Err(ReportStoreError::Unavailable(_))
        ));
        assert!(store.get_max_by_pair().await.is_err());
    }
}
