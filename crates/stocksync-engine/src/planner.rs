//! Grouping of a ticker universe into backfills and incremental batches.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use stocksync_types::{Interval, Ticker};

/// Tickers sharing one last-entry instant, fetched together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Last stored timestamp shared by every ticker in the batch.
    pub date: DateTime<Utc>,
    /// Tickers in universe order.
    pub tickers: Vec<Ticker>,
}

/// The work of one pass over one interval.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Tickers never stored at this interval, in universe order.
    pub new_tickers: Vec<Ticker>,
    /// Incremental batches in ascending date order.
    pub batches: Vec<Batch>,
    /// Stored tickers without a last entry; not planned.
    pub unresolved: Vec<Ticker>,
    /// Batches dropped because their date equals `now`.
    pub current: usize,
    /// Batches dropped because less than one interval has elapsed.
    pub fresh: usize,
}

impl SyncPlan {
    /// Returns the number of batches dropped this pass.
    #[must_use]
    pub const fn skipped_batches(&self) -> usize {
        self.current + self.fresh
    }

    /// Returns true if the plan requires no fetch.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.new_tickers.is_empty() && self.batches.is_empty()
    }
}

/// Splits a universe into new tickers and date-grouped batches.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncPlanner;

impl SyncPlanner {
    /// Plans one interval.
    ///
    /// `existing` holds the symbols already stored for the exchange and
    /// `last_entries` the most recent stored timestamp per symbol. Grouping
    /// uses the exact instant; no rounding is applied.
    #[must_use]
    pub fn plan(
        universe: &[Ticker],
        existing: &BTreeSet<String>,
        last_entries: &HashMap<String, DateTime<Utc>>,
        interval: Interval,
        now: DateTime<Utc>,
    ) -> SyncPlan {
        let mut plan = SyncPlan::default();
        let mut groups: BTreeMap<DateTime<Utc>, Vec<Ticker>> = BTreeMap::new();

        for ticker in universe {
            if !existing.contains(ticker.symbol()) {
                plan.new_tickers.push(ticker.clone());
                continue;
            }
            match last_entries.get(ticker.symbol()) {
                Some(date) => groups.entry(*date).or_default().push(ticker.clone()),
                None => {
                    tracing::warn!(%ticker, %interval, "stored ticker has no last entry, skipping");
                    plan.unresolved.push(ticker.clone());
                }
            }
        }

        let duration = interval.duration();
        for (date, tickers) in groups {
            if date == now {
                plan.current += 1;
            } else if now - date < duration {
                tracing::debug!(%date, %interval, tickers = tickers.len(), "batch younger than one interval");
                plan.fresh += 1;
            } else {
                plan.batches.push(Batch { date, tickers });
            }
        }

        plan
    }
}
