//! The storage contract consumed by the sync engine.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stocksync_types::{Interval, SyncPoint};
use thiserror::Error;

/// Errors that can occur while talking to the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The request could not be sent or its body not read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("Store returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The store rejected a query.
    #[error("Query failed: {message} (query: {query})")]
    Query {
        /// The rejected SQL.
        query: String,
        /// Error reported by the store.
        message: String,
    },

    /// A response could not be decoded.
    #[error("Failed to decode store response: {0}")]
    Decode(String),
}

/// Time-series store holding one table per interval.
///
/// Writes are idempotent per point identity: writing the same point twice
/// leaves one row with the latest values.
#[async_trait]
pub trait Store: Send + Sync {
    /// Creates the table of `interval` if it does not exist.
    async fn ensure_table(&self, interval: Interval) -> Result<(), StoreError>;

    /// Returns the distinct symbols stored for `exchange` in `interval`.
    async fn existing_tickers(
        &self,
        interval: Interval,
        exchange: &str,
    ) -> Result<BTreeSet<String>, StoreError>;

    /// Returns the most recent stored timestamp per symbol in `interval`.
    async fn last_entry_dates(
        &self,
        interval: Interval,
    ) -> Result<HashMap<String, DateTime<Utc>>, StoreError>;

    /// Persists a batch of points.
    async fn write_points(&self, points: &[SyncPoint]) -> Result<(), StoreError>;
}
