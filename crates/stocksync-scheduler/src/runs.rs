//! Last-run bookkeeping.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};

/// When each exchange was last synchronized by the loop.
///
/// Owned by the scheduler loop and never persisted; a restart starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastRuns {
    runs: BTreeMap<String, DateTime<Utc>>,
}

impl LastRuns {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a run of `exchange` at `at`.
    pub fn record(&mut self, exchange: &str, at: DateTime<Utc>) {
        self.runs.insert(exchange.to_string(), at);
    }

    /// Returns the last run of `exchange`.
    #[must_use]
    pub fn get(&self, exchange: &str) -> Option<DateTime<Utc>> {
        self.runs.get(exchange).copied()
    }

    /// Returns true if `exchange` ran less than `gap` before `now`.
    #[must_use]
    pub fn ran_within(&self, exchange: &str, now: DateTime<Utc>, gap: TimeDelta) -> bool {
        self.get(exchange).is_some_and(|last| now - last < gap)
    }

    /// Returns the number of exchanges that have run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Returns true if nothing has run yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
