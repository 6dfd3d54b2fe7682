//! In-process store.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stocksync_types::{Interval, SyncPoint};

use crate::{Store, StoreError};

type PointKey = (Interval, String, String, DateTime<Utc>);

#[derive(Debug, Default)]
struct Inner {
    tables: BTreeSet<Interval>,
    points: BTreeMap<PointKey, SyncPoint>,
    write_calls: usize,
}

/// [`Store`] keeping every point in memory, keyed by point identity.
///
/// Writing a point whose identity already exists replaces it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts points directly, creating their tables.
    pub fn seed(&self, points: impl IntoIterator<Item = SyncPoint>) {
        let mut inner = self.lock();
        for point in points {
            inner.tables.insert(point.interval);
            insert(&mut inner, point);
        }
    }

    /// Returns true if the table of `interval` has been created.
    #[must_use]
    pub fn has_table(&self, interval: Interval) -> bool {
        self.lock().tables.contains(&interval)
    }

    /// Returns the stored points of `interval`, ordered by exchange, ticker
    /// and timestamp.
    #[must_use]
    pub fn points(&self, interval: Interval) -> Vec<SyncPoint> {
        self.lock()
            .points
            .values()
            .filter(|point| point.interval == interval)
            .cloned()
            .collect()
    }

    /// Returns the stored points of one ticker in `interval`.
    #[must_use]
    pub fn series(&self, interval: Interval, exchange: &str, ticker: &str) -> Vec<SyncPoint> {
        self.lock()
            .points
            .values()
            .filter(|p| p.interval == interval && p.exchange == exchange && p.ticker == ticker)
            .cloned()
            .collect()
    }

    /// Returns the total number of stored points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().points.len()
    }

    /// Returns true if no points are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns how many non-empty `write_points` calls were made.
    #[must_use]
    pub fn write_calls(&self) -> usize {
        self.lock().write_calls
    }
}

fn insert(inner: &mut Inner, point: SyncPoint) {
    let key = (
        point.interval,
        point.exchange.clone(),
        point.ticker.clone(),
        point.timestamp,
    );
    inner.points.insert(key, point);
}

#[async_trait]
impl Store for MemoryStore {
    async fn ensure_table(&self, interval: Interval) -> Result<(), StoreError> {
        self.lock().tables.insert(interval);
        Ok(())
    }

    async fn existing_tickers(
        &self,
        interval: Interval,
        exchange: &str,
    ) -> Result<BTreeSet<String>, StoreError> {
        Ok(self
            .lock()
            .points
            .values()
            .filter(|p| p.interval == interval && p.exchange == exchange)
            .map(|p| p.ticker.clone())
            .collect())
    }

    async fn last_entry_dates(
        &self,
        interval: Interval,
    ) -> Result<HashMap<String, DateTime<Utc>>, StoreError> {
        let mut latest: HashMap<String, DateTime<Utc>> = HashMap::new();
        for point in self.lock().points.values().filter(|p| p.interval == interval) {
            latest
                .entry(point.ticker.clone())
                .and_modify(|ts| *ts = (*ts).max(point.timestamp))
                .or_insert(point.timestamp);
        }
        Ok(latest)
    }

    async fn write_points(&self, points: &[SyncPoint]) -> Result<(), StoreError> {
        if points.is_empty() {
            return Ok(());
        }
        let mut inner = self.lock();
        inner.write_calls += 1;
        for point in points {
            inner.tables.insert(point.interval);
            insert(&mut inner, point.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn point(exchange: &str, ticker: &str, interval: Interval, hour: u32, close: f64) -> SyncPoint {
        SyncPoint {
            exchange: exchange.to_string(),
            ticker: ticker.to_string(),
            interval,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            adj_close: close,
            volume: 1,
        }
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemoryStore::new();
        store
            .write_points(&[point("NASDAQ", "AAPL", Interval::Hour1, 10, 1.0)])
            .await
            .unwrap();
        store
            .write_points(&[point("NASDAQ", "AAPL", Interval::Hour1, 10, 2.0)])
            .await
            .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.points(Interval::Hour1)[0].close, 2.0);
        assert_eq!(store.write_calls(), 2);

        store.write_points(&[]).await.unwrap();
        assert_eq!(store.write_calls(), 2);
    }

    #[tokio::test]
    async fn test_existing_tickers_by_exchange() {
        let store = MemoryStore::new();
        store.seed([
            point("NASDAQ", "AAPL", Interval::Day1, 0, 1.0),
            point("NASDAQ", "MSFT", Interval::Day1, 0, 1.0),
            point("XETRA", "SAP", Interval::Day1, 0, 1.0),
            point("NASDAQ", "IBM", Interval::Minute5, 0, 1.0),
        ]);

        let tickers = store.existing_tickers(Interval::Day1, "NASDAQ").await.unwrap();
        assert_eq!(tickers.into_iter().collect::<Vec<_>>(), vec!["AAPL", "MSFT"]);
        assert!(store.has_table(Interval::Minute5));
        assert!(!store.has_table(Interval::Week1));
    }

    #[tokio::test]
    async fn test_last_entry_dates() {
        let store = MemoryStore::new();
        store.seed([
            point("NASDAQ", "AAPL", Interval::Hour1, 9, 1.0),
            point("NASDAQ", "AAPL", Interval::Hour1, 15, 1.0),
            point("NASDAQ", "MSFT", Interval::Hour1, 11, 1.0),
        ]);

        let last = store.last_entry_dates(Interval::Hour1).await.unwrap();
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(last["AAPL"], base + TimeDelta::hours(15));
        assert_eq!(last["MSFT"], base + TimeDelta::hours(11));
        assert!(store.last_entry_dates(Interval::Day1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ensure_table() {
        let store = MemoryStore::new();
        store.ensure_table(Interval::Minute15).await.unwrap();
        assert!(store.has_table(Interval::Minute15));
        assert!(store.is_empty());
    }
}
