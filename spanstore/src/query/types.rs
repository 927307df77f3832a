//! Trace search parameters

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

/// Parameters for a trace search
///
/// Every filter is optional; the empty query matches everything within the
/// reader's lookback window. Tags are exact-match pairs held in a `BTreeMap`
/// so clause emission follows a fixed lexicographic key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceQuery {
    /// Exact service name
    pub service_name: Option<String>,
    /// Exact operation name
    pub operation_name: Option<String>,
    /// Earliest span start time
    pub start_time_min: Option<DateTime<Utc>>,
    /// Latest span start time
    pub start_time_max: Option<DateTime<Utc>>,
    /// Minimum span duration; a zero duration behaves as absent
    pub duration_min: Option<Duration>,
    /// Maximum span duration; a zero duration behaves as absent
    pub duration_max: Option<Duration>,
    /// Exact-match tag filters
    pub tags: BTreeMap<String, String>,
}
