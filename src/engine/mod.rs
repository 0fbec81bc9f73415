//! Pure, synchronous report pipeline.
//!
//! Stages, in order: config filter, sync resolution, exclusion, report
//! filter, aggregation. Each stage takes its input by value or reference and
//! builds fresh working state; nothing is shared between calls.

use crate::domain::{PairKey, Report, Tolerance, UnixTime};
use std::collections::BTreeSet;

pub mod aggregate;
pub mod config_filter;
pub mod exclusion;
pub mod report_filter;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::{aggregate, reporting_date, AggregationError, Chart, ChartRow, ProjectData, ReportOutput};
pub use config_filter::filter_by_config;
pub use exclusion::compute_excluded;
pub use report_filter::filter_reports;
pub use sync::{max_by_pair, max_timestamp, resolve_synced_timestamp};

/// Result of applying the sync stages to a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome<R> {
    pub synced_timestamp: UnixTime,
    pub excluded: BTreeSet<PairKey>,
    pub reports: Vec<R>,
}

/// Resolve the snapshot, find stale pairs, and drop what doesn't belong to it.
pub fn sync_reports<R: Report>(reports: Vec<R>, tolerance: Tolerance) -> SyncOutcome<R> {
    let synced_timestamp = resolve_synced_timestamp(&reports, tolerance);
    let excluded = compute_excluded(&reports, synced_timestamp);
    let reports = filter_reports(reports, synced_timestamp, &excluded);
    SyncOutcome {
        synced_timestamp,
        excluded,
        reports,
    }
}
