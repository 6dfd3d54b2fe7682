//! The fetch contract consumed by the sync engine.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stocksync_types::{Interval, Period, PriceRow};
use thiserror::Error;

/// Rows per symbol, in provider order.
pub type PriceTable = BTreeMap<String, Vec<PriceRow>>;

/// Errors that fail a whole fetch call.
///
/// Failures of individual symbols are reported in [`FetchOutcome::errors`]
/// instead.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// The provider could not serve the request at all.
    #[error("Provider request failed: {0}")]
    Http(String),
}

/// Result of a multi-symbol fetch.
///
/// A symbol appears in `table`, in `errors`, or in neither (no rows in the
/// window); never in both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    /// Rows of every symbol that succeeded.
    pub table: PriceTable,
    /// Error message of every symbol that failed.
    pub errors: BTreeMap<String, String>,
}

impl FetchOutcome {
    /// Creates an empty outcome.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the rows of a symbol.
    pub fn insert_rows(&mut self, symbol: impl Into<String>, rows: Vec<PriceRow>) {
        let symbol = symbol.into();
        self.errors.remove(&symbol);
        self.table.insert(symbol, rows);
    }

    /// Records a per-symbol failure.
    pub fn insert_error(&mut self, symbol: impl Into<String>, message: impl Into<String>) {
        let symbol = symbol.into();
        self.table.remove(&symbol);
        self.errors.insert(symbol, message.into());
    }

    /// Returns the rows of a symbol, if it succeeded.
    #[must_use]
    pub fn rows(&self, symbol: &str) -> Option<&[PriceRow]> {
        self.table.get(symbol).map(Vec::as_slice)
    }

    /// Returns the total number of rows across symbols.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.table.values().map(Vec::len).sum()
    }

    /// Returns true if neither rows nor errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty() && self.errors.is_empty()
    }
}

/// Multi-symbol OHLCV source.
///
/// Implementations return an empty outcome for an empty symbol list without
/// contacting the provider.
#[async_trait]
pub trait FetchClient: Send + Sync {
    /// Fetches bars of `interval` in `[start, stop)`.
    async fn fetch_range(
        &self,
        symbols: &[String],
        start: DateTime<Utc>,
        stop: DateTime<Utc>,
        interval: Interval,
    ) -> Result<FetchOutcome, FetchError>;

    /// Fetches bars of `interval` over a provider lookback keyword.
    async fn fetch_period(
        &self,
        symbols: &[String],
        interval: Interval,
        period: Period,
    ) -> Result<FetchOutcome, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row() -> PriceRow {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        PriceRow::complete(ts, 1.0, 2.0, 0.5, 1.5, 1.5, 10)
    }

    #[test]
    fn test_symbol_is_rows_or_error() {
        let mut outcome = FetchOutcome::new();
        assert!(outcome.is_empty());

        outcome.insert_error("AAPL", "timeout");
        outcome.insert_rows("AAPL", vec![row(), row()]);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.rows("AAPL").map(<[PriceRow]>::len), Some(2));

        outcome.insert_error("AAPL", "delisted");
        assert!(outcome.rows("AAPL").is_none());
        assert_eq!(outcome.errors["AAPL"], "delisted");
    }

    #[test]
    fn test_row_count() {
        let mut outcome = FetchOutcome::new();
        outcome.insert_rows("AAPL", vec![row()]);
        outcome.insert_rows("MSFT", vec![row(), row()]);
        outcome.insert_rows("IBM", Vec::new());
        assert_eq!(outcome.row_count(), 3);
    }
}
