//! Engine configuration.

use chrono::TimeDelta;
use stocksync_types::{Interval, VOLUME_CEILING};

/// Tunables of a sync pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Intervals synchronized for every exchange, in order.
    pub intervals: Vec<Interval>,
    /// Width of one intraday slice in days.
    pub slice_days: u32,
    /// Longest range the provider serves intraday data for in one request.
    pub single_request_span: TimeDelta,
    /// How far back intraday history is requested.
    pub intraday_lookback: TimeDelta,
    /// Oldest intraday data the provider serves. Older gaps are truncated to
    /// `intraday_lookback`.
    pub intraday_max_age: TimeDelta,
    /// Buffered points that trigger a store write.
    pub write_batch_size: usize,
    /// Largest volume written to the store.
    pub volume_ceiling: i64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            intervals: vec![Interval::Minute5, Interval::Day1],
            slice_days: 6,
            single_request_span: TimeDelta::days(6),
            intraday_lookback: TimeDelta::days(29),
            intraday_max_age: TimeDelta::days(30),
            write_batch_size: 30_000,
            volume_ceiling: VOLUME_CEILING,
        }
    }
}

impl SyncConfig {
    /// Replaces the synchronized intervals.
    #[must_use]
    pub fn with_intervals(mut self, intervals: impl Into<Vec<Interval>>) -> Self {
        self.intervals = intervals.into();
        self
    }

    /// Replaces the write batch size. Zero is treated as one.
    #[must_use]
    pub fn with_write_batch_size(mut self, size: usize) -> Self {
        self.write_batch_size = size.max(1);
        self
    }
}
