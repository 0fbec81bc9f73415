//! Pairs whose latest report predates the synced timestamp.

use super::sync::max_by_pair;
use crate::domain::{PairKey, Report, UnixTime};
use std::collections::BTreeSet;

/// Stale pairs for the given snapshot. A pair reporting beyond the snapshot
/// is not stale; only one that stopped before it is.
pub fn compute_excluded<R: Report>(reports: &[R], synced_timestamp: UnixTime) -> BTreeSet<PairKey> {
    max_by_pair(reports)
        .into_iter()
        .filter(|(_, max)| *max < synced_timestamp)
        .map(|(key, _)| key)
        .collect()
}
