//! Resolve the latest timestamp at which every tracked pair has reported.

use crate::domain::{PairKey, Report, Tolerance, UnixTime};
use std::collections::HashMap;

/// Latest timestamp across all reports, or the epoch for an empty batch.
pub fn max_timestamp<R: Report>(reports: &[R]) -> UnixTime {
    reports
        .iter()
        .map(|r| r.timestamp())
        .max()
        .unwrap_or(UnixTime::EPOCH)
}

/// Latest timestamp observed for each (bridge, asset) pair.
pub fn max_by_pair<R: Report>(reports: &[R]) -> HashMap<PairKey, UnixTime> {
    let mut result: HashMap<PairKey, UnixTime> = HashMap::new();
    for report in reports {
        let timestamp = report.timestamp();
        result
            .entry(report.pair_key())
            .and_modify(|max| {
                if timestamp > *max {
                    *max = timestamp;
                }
            })
            .or_insert(timestamp);
    }
    result
}

/// Pick the snapshot timestamp for the batch.
///
/// A pair is in sync when its latest report is at the batch maximum, or when
/// it is older than one full tolerance window (long-stale pairs get excluded
/// instead of holding everyone back). Any pair in between moves the snapshot
/// back by exactly one window.
pub fn resolve_synced_timestamp<R: Report>(reports: &[R], tolerance: Tolerance) -> UnixTime {
    let max = max_timestamp(reports);
    let window_start = tolerance.before(max);

    let all_synced = max_by_pair(reports)
        .values()
        .all(|&pair_max| pair_max == max || pair_max < window_start);

    if all_synced {
        max
    } else {
        window_start
    }
}
