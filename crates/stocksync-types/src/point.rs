//! Price rows and storage points.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Interval;

/// Largest volume the store's line-protocol integer field accepts.
///
/// The column is a 64-bit `LONG`, but the ingestion path only carries 32-bit
/// signed integers.
pub const VOLUME_CEILING: i64 = i32::MAX as i64;

/// Timestamp of a fetched row.
///
/// Providers may or may not attach an offset to their timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTimestamp {
    /// Timestamp carrying an explicit UTC offset.
    Zoned(DateTime<FixedOffset>),
    /// Timestamp without offset information. Interpreted as UTC.
    Naive(NaiveDateTime),
}

impl RowTimestamp {
    /// Converts the timestamp to a UTC instant.
    #[must_use]
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            Self::Zoned(ts) => ts.with_timezone(&Utc),
            Self::Naive(ts) => ts.and_utc(),
        }
    }
}

impl From<DateTime<Utc>> for RowTimestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Zoned(value.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for RowTimestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Zoned(value)
    }
}

impl From<NaiveDateTime> for RowTimestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self::Naive(value)
    }
}

/// One OHLCV row as returned by the fetch client.
///
/// Any field may be missing; the provider pads gaps with nulls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRow {
    /// Bar timestamp.
    pub timestamp: RowTimestamp,
    /// Opening price.
    pub open: Option<f64>,
    /// Highest price.
    pub high: Option<f64>,
    /// Lowest price.
    pub low: Option<f64>,
    /// Closing price.
    pub close: Option<f64>,
    /// Close adjusted for splits and dividends.
    pub adj_close: Option<f64>,
    /// Traded volume.
    pub volume: Option<i64>,
}

impl PriceRow {
    /// Creates a row with every field present.
    #[must_use]
    pub fn complete(
        timestamp: impl Into<RowTimestamp>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        adj_close: f64,
        volume: i64,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
            adj_close: Some(adj_close),
            volume: Some(volume),
        }
    }
}

/// One validated OHLCV sample ready to be written to the store.
///
/// Identity is `(exchange, ticker, interval, timestamp)`; writing the same
/// point twice overwrites it with identical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPoint {
    /// Exchange tag.
    pub exchange: String,
    /// Ticker symbol tag.
    pub ticker: String,
    /// Interval tag.
    pub interval: Interval,
    /// Sample time (UTC).
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Adjusted closing price.
    pub adj_close: f64,
    /// Traded volume, clamped to [`VOLUME_CEILING`].
    pub volume: i64,
}

impl SyncPoint {
    /// Returns the identity key of this point.
    #[must_use]
    pub fn key(&self) -> (&str, &str, Interval, DateTime<Utc>) {
        (&self.exchange, &self.ticker, self.interval, self.timestamp)
    }
}
