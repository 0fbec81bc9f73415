//! Apply a resolved snapshot to a report batch.

use crate::domain::{PairKey, Report, UnixTime};
use std::collections::BTreeSet;

/// Drop reports newer than the snapshot and reports of stale pairs.
pub fn filter_reports<R: Report>(
    reports: Vec<R>,
    synced_timestamp: UnixTime,
    excluded: &BTreeSet<PairKey>,
) -> Vec<R> {
    reports
        .into_iter()
        .filter(|r| r.timestamp() <= synced_timestamp && !excluded.contains(&r.pair_key()))
        .collect()
}
