use crate::datasource::{ReportStore, ReportStoreError};
use crate::domain::{ObservationWithBalance, Tolerance};
use crate::engine::{aggregate, filter_by_config, sync_reports, AggregationError, ReportOutput};
use crate::registry::Registry;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Turns the stored report history into the TVL document.
#[derive(Debug, Clone)]
pub struct ReportController {
    store: Arc<dyn ReportStore>,
    registry: Arc<Registry>,
    tolerance: Tolerance,
}

impl ReportController {
    pub fn new(store: Arc<dyn ReportStore>, registry: Arc<Registry>, tolerance: Tolerance) -> Self {
        Self {
            store,
            registry,
            tolerance,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Reports belonging to the latest consistent snapshot.
    pub async fn get_and_filter_reports(
        &self,
    ) -> Result<Vec<ObservationWithBalance>, ReportError> {
        let (reports, max_by_pair) =
            tokio::try_join!(self.store.get_daily(), self.store.get_max_by_pair())?;
        let fetched = reports.len();

        let reports = filter_by_config(reports, &self.registry.projects);
        let tracked = reports.len();

        let present: HashSet<_> = reports.iter().map(|r| r.observation.pair_key()).collect();
        let without_daily = max_by_pair
            .keys()
            .filter(|key| !present.contains(*key))
            .count();
        if without_daily > 0 {
            debug!(pairs = without_daily, "Pairs in store without tracked daily reports");
        }

        let outcome = sync_reports(reports, self.tolerance);
        for key in &outcome.excluded {
            warn!(pair = %key, synced_timestamp = %outcome.synced_timestamp, "Excluding stale pair");
        }
        info!(
            fetched,
            tracked,
            kept = outcome.reports.len(),
            excluded = outcome.excluded.len(),
            synced_timestamp = %outcome.synced_timestamp,
            "Reports synchronized"
        );

        Ok(outcome.reports)
    }

    /// Build the daily TVL document.
    pub async fn get_daily(&self) -> Result<ReportOutput, ReportError> {
        let reports = self.get_and_filter_reports().await?;
        Ok(aggregate(
            &reports,
            &self.registry.projects,
            &self.registry.tokens,
        )?)
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Store(#[from] ReportStoreError),
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}
