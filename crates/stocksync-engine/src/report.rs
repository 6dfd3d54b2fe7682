//! Pass accounting.

use std::collections::BTreeSet;

use stocksync_types::Interval;

/// Outcome of one interval pass for one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Exchange code.
    pub exchange: String,
    /// Synchronized interval.
    pub interval: Interval,
    /// Tickers backfilled from scratch.
    pub new_tickers: usize,
    /// Incremental batches fetched.
    pub batches: usize,
    /// Batches dropped as already current or younger than one interval.
    pub skipped_batches: usize,
    /// Stored tickers without a last entry.
    pub unresolved: usize,
    /// Fetch calls issued.
    pub fetch_calls: usize,
    /// Points written to the store.
    pub points_written: usize,
    /// Rows dropped by the point builder.
    pub rows_rejected: usize,
    /// Symbols whose fetch failed; retried on the next pass.
    pub deferred: BTreeSet<String>,
}

impl SyncReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new(exchange: impl Into<String>, interval: Interval) -> Self {
        Self {
            exchange: exchange.into(),
            interval,
            new_tickers: 0,
            batches: 0,
            skipped_batches: 0,
            unresolved: 0,
            fetch_calls: 0,
            points_written: 0,
            rows_rejected: 0,
            deferred: BTreeSet::new(),
        }
    }
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {} new, {} batches ({} skipped), {} fetches, {} points written, {} rows rejected, {} deferred",
            self.exchange,
            self.interval,
            self.new_tickers,
            self.batches,
            self.skipped_batches,
            self.fetch_calls,
            self.points_written,
            self.rows_rejected,
            self.deferred.len()
        )
    }
}

/// An interval whose pass failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalFailure {
    /// The failed interval.
    pub interval: Interval,
    /// Error message.
    pub error: String,
}

/// Outcome of one exchange pass over every configured interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeReport {
    /// Exchange code.
    pub exchange: String,
    /// Reports of the intervals that completed.
    pub intervals: Vec<SyncReport>,
    /// Intervals that failed.
    pub failures: Vec<IntervalFailure>,
}

impl ExchangeReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new(exchange: impl Into<String>) -> Self {
        Self {
            exchange: exchange.into(),
            intervals: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Returns the points written across intervals.
    #[must_use]
    pub fn points_written(&self) -> usize {
        self.intervals.iter().map(|r| r.points_written).sum()
    }

    /// Returns true if every interval completed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
