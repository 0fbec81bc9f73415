//! Report store abstraction: where batches of reports come from.

use crate::domain::{ObservationWithBalance, PairKey, UnixTime};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

pub mod mock;

pub use mock::MockReportStore;

/// Source of report batches for the synchronization pipeline.
#[async_trait]
pub trait ReportStore: Send + Sync + fmt::Debug {
    /// Fetch daily reports, ordered by timestamp.
    async fn get_daily(&self) -> Result<Vec<ObservationWithBalance>, ReportStoreError>;

    /// Last seen timestamp of every (bridge, asset) pair in the store.
    async fn get_max_by_pair(&self) -> Result<HashMap<PairKey, UnixTime>, ReportStoreError>;
}

/// Error type for report store operations.
#[derive(Debug, Error)]
pub enum ReportStoreError {
    /// Underlying database failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    /// Stored row could not be decoded into a report.
    #[error("Parse error: {0}")]
    Parse(String),
    /// Store unreachable or refusing requests.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_store_error_display() {
        let err = ReportStoreError::Parse("usd_tvl: invalid digit".to_string());
        assert_eq!(err.to_string(), "Parse error: usd_tvl: invalid digit");

        let err = ReportStoreError::Unavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "Store unavailable: connection refused");

        let err = ReportStoreError::from(sqlx::Error::RowNotFound);
        assert!(err.to_string().starts_with("Database error:"));
    }
}
