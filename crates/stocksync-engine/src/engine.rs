//! Per-exchange synchronization passes.

use chrono::{DateTime, Utc};
use stocksync_fetch::{FetchClient, FetchError};
use stocksync_store::{Store, StoreError};
use stocksync_types::{Interval, IntervalClass, Period, Ticker};
use thiserror::Error;

use crate::{
    ExchangeReport, IntervalFailure, PointBuilder, RangeSlicer, SyncConfig, SyncPlan, SyncPlanner,
    SyncReport, WriteBuffer,
};

/// Errors that abort a pass.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The exchange has an empty universe.
    #[error("No tickers for exchange {0}")]
    NoTickersForExchange(String),

    /// The store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A whole fetch call failed.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Clone, Copy)]
enum FetchRequest {
    Range(DateTime<Utc>, DateTime<Utc>),
    Period(Period),
}

/// Synchronizes exchanges from a [`FetchClient`] into a [`Store`].
///
/// Exchanges and intervals are processed one after the other; each fetch
/// result is written before the next fetch is issued.
#[derive(Debug)]
pub struct SyncEngine<F, S> {
    fetcher: F,
    store: S,
    config: SyncConfig,
    builder: PointBuilder,
    slicer: RangeSlicer,
}

impl<F: FetchClient, S: Store> SyncEngine<F, S> {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new(fetcher: F, store: S) -> Self {
        Self::with_config(fetcher, store, SyncConfig::default())
    }

    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn with_config(fetcher: F, store: S, config: SyncConfig) -> Self {
        Self {
            builder: PointBuilder::new(config.volume_ceiling),
            slicer: RangeSlicer::new(config.slice_days, config.single_request_span),
            fetcher,
            store,
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns the fetch client.
    #[must_use]
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns the store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Synchronizes every configured interval of one exchange.
    ///
    /// A failing interval is logged and recorded in the report; the other
    /// intervals still run.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NoTickersForExchange`] if `tickers` is empty.
    pub async fn sync_exchange(
        &self,
        exchange: &str,
        tickers: &[Ticker],
        now: DateTime<Utc>,
    ) -> Result<ExchangeReport, SyncError> {
        if tickers.is_empty() {
            return Err(SyncError::NoTickersForExchange(exchange.to_string()));
        }

        let mut report = ExchangeReport::new(exchange);
        for &interval in &self.config.intervals {
            match self.sync_interval(exchange, tickers, interval, now).await {
                Ok(interval_report) => report.intervals.push(interval_report),
                Err(e) => {
                    tracing::error!(exchange, %interval, error = %e, "interval sync failed");
                    report.failures.push(IntervalFailure {
                        interval,
                        error: e.to_string(),
                    });
                }
            }
        }
        Ok(report)
    }

    /// Plans one interval from the store's current contents without fetching.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    pub async fn plan_interval(
        &self,
        exchange: &str,
        tickers: &[Ticker],
        interval: Interval,
        now: DateTime<Utc>,
    ) -> Result<SyncPlan, SyncError> {
        let existing = self.store.existing_tickers(interval, exchange).await?;
        let last_entries = self.store.last_entry_dates(interval).await?;
        Ok(SyncPlanner::plan(tickers, &existing, &last_entries, interval, now))
    }

    /// Synchronizes one interval of one exchange.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or a whole fetch call fails.
    pub async fn sync_interval(
        &self,
        exchange: &str,
        tickers: &[Ticker],
        interval: Interval,
        now: DateTime<Utc>,
    ) -> Result<SyncReport, SyncError> {
        tracing::info!(exchange, %interval, tickers = tickers.len(), "syncing interval");

        self.store.ensure_table(interval).await?;
        let plan = self.plan_interval(exchange, tickers, interval, now).await?;

        let mut report = SyncReport::new(exchange, interval);
        report.new_tickers = plan.new_tickers.len();
        report.batches = plan.batches.len();
        report.skipped_batches = plan.skipped_batches();
        report.unresolved = plan.unresolved.len();

        let mut buffer = WriteBuffer::new(self.config.write_batch_size);

        if !plan.new_tickers.is_empty() {
            tracing::info!(exchange, %interval, tickers = plan.new_tickers.len(), "backfilling new tickers");
            match interval.class() {
                IntervalClass::Daily => {
                    self.fetch_and_write(
                        &plan.new_tickers,
                        interval,
                        FetchRequest::Period(Period::Max),
                        None,
                        &mut buffer,
                        &mut report,
                    )
                    .await?;
                }
                IntervalClass::Intraday => {
                    let start = now - self.config.intraday_lookback;
                    for window in self.slicer.slice(start, now, true) {
                        self.fetch_and_write(
                            &plan.new_tickers,
                            interval,
                            FetchRequest::Range(window.start, window.end),
                            window.floor,
                            &mut buffer,
                            &mut report,
                        )
                        .await?;
                    }
                }
            }
        }

        for batch in &plan.batches {
            if self.slicer.needs_slicing(interval.class(), batch.date, now) {
                let start = if now - batch.date > self.config.intraday_max_age {
                    tracing::warn!(
                        exchange,
                        %interval,
                        last_entry = %batch.date,
                        tickers = batch.tickers.len(),
                        "gap exceeds provider intraday history, data before the lookback is lost"
                    );
                    now - self.config.intraday_lookback
                } else {
                    batch.date
                };
                for window in self.slicer.slice(start, now, false) {
                    self.fetch_and_write(
                        &batch.tickers,
                        interval,
                        FetchRequest::Range(window.start, window.end),
                        window.floor,
                        &mut buffer,
                        &mut report,
                    )
                    .await?;
                }
            } else {
                self.fetch_and_write(
                    &batch.tickers,
                    interval,
                    FetchRequest::Range(batch.date, now),
                    Some(batch.date),
                    &mut buffer,
                    &mut report,
                )
                .await?;
            }
        }

        report.points_written = buffer.written();
        tracing::info!(%report, "interval finished");
        Ok(report)
    }

    /// Fetches `tickers`, writes the valid rows and records failed symbols.
    async fn fetch_and_write(
        &self,
        tickers: &[Ticker],
        interval: Interval,
        request: FetchRequest,
        floor: Option<DateTime<Utc>>,
        buffer: &mut WriteBuffer,
        report: &mut SyncReport,
    ) -> Result<(), SyncError> {
        let symbols: Vec<String> = tickers.iter().map(|t| t.symbol().to_string()).collect();
        tracing::debug!(%interval, symbols = symbols.len(), ?request, "fetching");

        let outcome = match request {
            FetchRequest::Range(start, stop) => {
                self.fetcher
                    .fetch_range(&symbols, start, stop, interval)
                    .await?
            }
            FetchRequest::Period(period) => {
                self.fetcher
                    .fetch_period(&symbols, interval, period)
                    .await?
            }
        };
        report.fetch_calls += 1;

        for (symbol, message) in &outcome.errors {
            tracing::warn!(symbol, %interval, error = %message, "fetch failed, deferring symbol");
            report.deferred.insert(symbol.clone());
        }

        // A symbol that failed in any window of this interval stays unwritten
        // until the next pass re-plans it from the store.
        for ticker in tickers {
            if report.deferred.contains(ticker.symbol()) {
                continue;
            }
            let Some(rows) = outcome.rows(ticker.symbol()) else {
                continue;
            };
            for row in rows {
                match self.builder.build(row, ticker, interval, floor) {
                    Some(point) => buffer.push(&self.store, point).await?,
                    None => report.rows_rejected += 1,
                }
            }
        }

        buffer.flush(&self.store).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeDelta, TimeZone};
    use std::collections::{BTreeSet, HashMap};
    use std::sync::Mutex;
    use stocksync_fetch::FetchOutcome;
    use stocksync_store::MemoryStore;
    use stocksync_types::{PriceRow, SyncPoint};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Range {
            symbols: Vec<String>,
            start: DateTime<Utc>,
            stop: DateTime<Utc>,
            interval: Interval,
        },
        Period {
            symbols: Vec<String>,
            interval: Interval,
            period: Period,
        },
    }

    /// Serves canned rows; range requests return rows with `start <= ts <= stop`.
    #[derive(Default)]
    struct ScriptedFetcher {
        rows: HashMap<String, Vec<PriceRow>>,
        errors: HashMap<String, String>,
        first_call_errors: HashMap<String, String>,
        calls: Mutex<Vec<Call>>,
    }

    impl ScriptedFetcher {
        fn with_rows(mut self, symbol: &str, rows: Vec<PriceRow>) -> Self {
            self.rows.insert(symbol.to_string(), rows);
            self
        }

        fn with_error(mut self, symbol: &str, message: &str) -> Self {
            self.errors.insert(symbol.to_string(), message.to_string());
            self
        }

        /// Fails `symbol` on the first call only; later calls serve its rows.
        fn with_first_call_error(mut self, symbol: &str, message: &str) -> Self {
            self.first_call_errors.insert(symbol.to_string(), message.to_string());
            self
        }

        fn record(&self, call: Call) -> bool {
            let mut calls = self.calls.lock().unwrap();
            calls.push(call);
            calls.len() == 1
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn outcome(
            &self,
            symbols: &[String],
            first: bool,
            keep: impl Fn(&PriceRow) -> bool,
        ) -> FetchOutcome {
            let mut outcome = FetchOutcome::new();
            for symbol in symbols {
                let error = self
                    .errors
                    .get(symbol)
                    .or_else(|| self.first_call_errors.get(symbol).filter(|_| first));
                if let Some(message) = error {
                    outcome.insert_error(symbol.clone(), message.clone());
                } else if let Some(rows) = self.rows.get(symbol) {
                    let rows: Vec<PriceRow> = rows.iter().filter(|r| keep(r)).copied().collect();
                    if !rows.is_empty() {
                        outcome.insert_rows(symbol.clone(), rows);
                    }
                }
            }
            outcome
        }
    }

    #[async_trait]
    impl FetchClient for ScriptedFetcher {
        async fn fetch_range(
            &self,
            symbols: &[String],
            start: DateTime<Utc>,
            stop: DateTime<Utc>,
            interval: Interval,
        ) -> Result<FetchOutcome, FetchError> {
            let first = self.record(Call::Range {
                symbols: symbols.to_vec(),
                start,
                stop,
                interval,
            });
            Ok(self.outcome(symbols, first, |row| {
                let ts = row.timestamp.to_utc();
                start <= ts && ts <= stop
            }))
        }

        async fn fetch_period(
            &self,
            symbols: &[String],
            interval: Interval,
            period: Period,
        ) -> Result<FetchOutcome, FetchError> {
            let first = self.record(Call::Period {
                symbols: symbols.to_vec(),
                interval,
                period,
            });
            Ok(self.outcome(symbols, first, |_| true))
        }
    }

    /// Memory store whose every call fails for one interval.
    struct FailingStore {
        inner: MemoryStore,
        failing: Interval,
    }

    impl FailingStore {
        fn check(&self, interval: Interval) -> Result<(), StoreError> {
            if interval == self.failing {
                return Err(StoreError::Status {
                    status: 500,
                    body: "unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Store for FailingStore {
        async fn ensure_table(&self, interval: Interval) -> Result<(), StoreError> {
            self.check(interval)?;
            self.inner.ensure_table(interval).await
        }

        async fn existing_tickers(
            &self,
            interval: Interval,
            exchange: &str,
        ) -> Result<BTreeSet<String>, StoreError> {
            self.check(interval)?;
            self.inner.existing_tickers(interval, exchange).await
        }

        async fn last_entry_dates(
            &self,
            interval: Interval,
        ) -> Result<HashMap<String, DateTime<Utc>>, StoreError> {
            self.check(interval)?;
            self.inner.last_entry_dates(interval).await
        }

        async fn write_points(&self, points: &[SyncPoint]) -> Result<(), StoreError> {
            self.inner.write_points(points).await
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 22, 0, 0).unwrap()
    }

    fn bar(ts: DateTime<Utc>) -> PriceRow {
        PriceRow::complete(ts, 100.0, 101.0, 99.0, 100.5, 100.2, 5_000)
    }

    fn stored(ticker: &str, interval: Interval, ts: DateTime<Utc>) -> SyncPoint {
        SyncPoint {
            exchange: "NASDAQ".to_string(),
            ticker: ticker.to_string(),
            interval,
            timestamp: ts,
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            adj_close: 1.0,
            volume: 1,
        }
    }

    fn nasdaq(symbols: &[&str]) -> Vec<Ticker> {
        symbols.iter().map(|s| Ticker::new(s, "NASDAQ")).collect()
    }

    fn config(intervals: &[Interval]) -> SyncConfig {
        SyncConfig::default().with_intervals(intervals)
    }

    #[tokio::test]
    async fn test_scenario_a_daily_backfill() {
        let days: Vec<PriceRow> = (1..=10)
            .map(|d| bar(Utc.with_ymd_and_hms(2024, 3, d, 21, 0, 0).unwrap()))
            .collect();
        let mut rows = days.clone();
        rows.push(PriceRow {
            close: None,
            ..bar(Utc.with_ymd_and_hms(2024, 3, 11, 21, 0, 0).unwrap())
        });
        let fetcher = ScriptedFetcher::default().with_rows("AAPL", rows);
        let engine = SyncEngine::with_config(fetcher, MemoryStore::new(), config(&[Interval::Day1]));

        let report = engine
            .sync_interval("NASDAQ", &nasdaq(&["AAPL"]), Interval::Day1, now())
            .await
            .unwrap();

        assert_eq!(
            engine.fetcher().calls(),
            vec![Call::Period {
                symbols: vec!["AAPL".to_string()],
                interval: Interval::Day1,
                period: Period::Max,
            }]
        );
        assert_eq!(report.new_tickers, 1);
        assert_eq!(report.fetch_calls, 1);
        assert_eq!(report.points_written, 10);
        assert_eq!(report.rows_rejected, 1);
        assert!(engine.store().has_table(Interval::Day1));

        let existing = engine
            .store()
            .existing_tickers(Interval::Day1, "NASDAQ")
            .await
            .unwrap();
        assert!(existing.contains("AAPL"));
    }

    #[tokio::test]
    async fn test_scenario_b_daily_incremental() {
        let last = now() - TimeDelta::days(10);
        let rows: Vec<PriceRow> = (1..=14)
            .map(|d| bar(Utc.with_ymd_and_hms(2024, 3, d, 22, 0, 0).unwrap()))
            .collect();
        let store = MemoryStore::new();
        store.seed([stored("MSFT", Interval::Day1, last)]);
        let fetcher = ScriptedFetcher::default().with_rows("MSFT", rows);
        let engine = SyncEngine::with_config(fetcher, store, config(&[Interval::Day1]));

        let report = engine
            .sync_interval("NASDAQ", &nasdaq(&["MSFT"]), Interval::Day1, now())
            .await
            .unwrap();

        assert_eq!(
            engine.fetcher().calls(),
            vec![Call::Range {
                symbols: vec!["MSFT".to_string()],
                start: last,
                stop: now(),
                interval: Interval::Day1,
            }]
        );
        assert_eq!(report.batches, 1);
        // Mar 5 22:00 equals the last entry and is dropped; Mar 6..14 are new.
        assert_eq!(report.points_written, 9);
        assert_eq!(report.rows_rejected, 1);

        let series = engine.store().series(Interval::Day1, "NASDAQ", "MSFT");
        assert_eq!(series.len(), 10);
        assert!(series.iter().filter(|p| p.close > 50.0).all(|p| p.timestamp > last));
    }

    #[tokio::test]
    async fn test_scenario_c_intraday_gap_truncated() {
        let last = now() - TimeDelta::days(45);
        let lookback_start = now() - TimeDelta::days(29);
        let rows = vec![
            bar(lookback_start),
            bar(lookback_start + TimeDelta::minutes(5)),
            bar(now() - TimeDelta::hours(1)),
        ];
        let store = MemoryStore::new();
        store.seed([stored("TSLA", Interval::Minute5, last)]);
        let fetcher = ScriptedFetcher::default().with_rows("TSLA", rows);
        let engine = SyncEngine::with_config(fetcher, store, config(&[Interval::Minute5]));

        let report = engine
            .sync_interval("NASDAQ", &nasdaq(&["TSLA"]), Interval::Minute5, now())
            .await
            .unwrap();

        let calls = engine.fetcher().calls();
        let windows: Vec<(DateTime<Utc>, DateTime<Utc>)> = calls
            .iter()
            .map(|call| match call {
                Call::Range { start, stop, .. } => (*start, *stop),
                Call::Period { .. } => panic!("unexpected period fetch"),
            })
            .collect();
        assert_eq!(windows.len(), 5);
        assert_eq!(windows[0].0, lookback_start);
        assert_eq!(windows[4].1, now());
        assert!(windows.iter().all(|(start, _)| *start > last));
        assert!(windows.windows(2).all(|pair| pair[0].1 == pair[1].0));

        // The row at the lookback start is not after the floor.
        assert_eq!(report.points_written, 2);
        assert_eq!(report.rows_rejected, 1);
        assert_eq!(report.fetch_calls, 5);
    }

    #[tokio::test]
    async fn test_scenario_d_symbol_error_deferred() {
        let last = now() - TimeDelta::days(3);
        let symbols = ["AAPL", "MSFT", "GOOGL", "AMZN", "META"];
        let store = MemoryStore::new();
        store.seed(symbols.iter().map(|s| stored(s, Interval::Day1, last)));

        let mut fetcher = ScriptedFetcher::default();
        for symbol in symbols {
            fetcher = fetcher.with_rows(
                symbol,
                vec![bar(now() - TimeDelta::days(2)), bar(now() - TimeDelta::days(1))],
            );
        }
        let fetcher = fetcher.with_error("GOOGL", "No data found, symbol may be delisted");
        let engine = SyncEngine::with_config(fetcher, store, config(&[Interval::Day1]));

        let report = engine
            .sync_interval("NASDAQ", &nasdaq(&symbols), Interval::Day1, now())
            .await
            .unwrap();

        assert_eq!(engine.fetcher().calls().len(), 1);
        assert_eq!(report.points_written, 8);
        assert_eq!(report.deferred, BTreeSet::from(["GOOGL".to_string()]));
        assert_eq!(engine.store().series(Interval::Day1, "NASDAQ", "GOOGL").len(), 1);
        for symbol in ["AAPL", "MSFT", "AMZN", "META"] {
            assert_eq!(engine.store().series(Interval::Day1, "NASDAQ", symbol).len(), 3);
        }
    }

    #[tokio::test]
    async fn test_intraday_backfill_slices_lookback() {
        let start = now() - TimeDelta::days(29);
        let fetcher = ScriptedFetcher::default().with_rows("NVDA", vec![bar(start), bar(now())]);
        let engine = SyncEngine::with_config(fetcher, MemoryStore::new(), config(&[Interval::Minute15]));

        let report = engine
            .sync_interval("NASDAQ", &nasdaq(&["NVDA"]), Interval::Minute15, now())
            .await
            .unwrap();

        let calls = engine.fetcher().calls();
        assert_eq!(calls.len(), 5);
        assert!(matches!(&calls[0], Call::Range { start: s, .. } if *s == start));
        // No floor on a backfill: the row at the window start is kept.
        assert_eq!(report.points_written, 2);
        assert_eq!(report.rows_rejected, 0);
    }

    #[tokio::test]
    async fn test_intraday_short_gap_slices_from_last_entry() {
        let last = now() - TimeDelta::days(10);
        let store = MemoryStore::new();
        store.seed([stored("AMD", Interval::Minute5, last)]);
        let engine = SyncEngine::with_config(ScriptedFetcher::default(), store, config(&[Interval::Minute5]));

        engine
            .sync_interval("NASDAQ", &nasdaq(&["AMD"]), Interval::Minute5, now())
            .await
            .unwrap();

        let calls = engine.fetcher().calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(&calls[0], Call::Range { start, .. } if *start == last));
    }

    #[tokio::test]
    async fn test_deferred_symbol_skipped_in_later_windows() {
        let last = now() - TimeDelta::days(10);
        let rows = vec![bar(last + TimeDelta::days(1)), bar(now() - TimeDelta::days(1))];
        let store = MemoryStore::new();
        store.seed([
            stored("TSLA", Interval::Minute5, last),
            stored("AMD", Interval::Minute5, last),
        ]);
        let fetcher = ScriptedFetcher::default()
            .with_rows("TSLA", rows.clone())
            .with_rows("AMD", rows)
            .with_first_call_error("TSLA", "Too Many Requests");
        let engine = SyncEngine::with_config(fetcher, store, config(&[Interval::Minute5]));

        let report = engine
            .sync_interval("NASDAQ", &nasdaq(&["TSLA", "AMD"]), Interval::Minute5, now())
            .await
            .unwrap();

        assert_eq!(report.fetch_calls, 2);
        assert_eq!(report.deferred, BTreeSet::from(["TSLA".to_string()]));
        assert_eq!(report.points_written, 2);
        assert_eq!(engine.store().series(Interval::Minute5, "NASDAQ", "TSLA").len(), 1);
        assert_eq!(engine.store().series(Interval::Minute5, "NASDAQ", "AMD").len(), 3);
    }

    #[tokio::test]
    async fn test_intraday_within_span_single_fetch() {
        let last = now() - TimeDelta::days(2);
        let store = MemoryStore::new();
        store.seed([stored("AMD", Interval::Minute5, last)]);
        let engine = SyncEngine::with_config(ScriptedFetcher::default(), store, config(&[Interval::Minute5]));

        let report = engine
            .sync_interval("NASDAQ", &nasdaq(&["AMD"]), Interval::Minute5, now())
            .await
            .unwrap();
        assert_eq!(report.fetch_calls, 1);
        assert_eq!(
            engine.fetcher().calls()[0],
            Call::Range {
                symbols: vec!["AMD".to_string()],
                start: last,
                stop: now(),
                interval: Interval::Minute5,
            }
        );
    }

    #[tokio::test]
    async fn test_writes_in_batches() {
        let rows: Vec<PriceRow> = (0..10)
            .map(|m| bar(now() - TimeDelta::hours(5) + TimeDelta::minutes(5 * m)))
            .collect();
        let fetcher = ScriptedFetcher::default().with_rows("INTC", rows);
        let engine = SyncEngine::with_config(
            fetcher,
            MemoryStore::new(),
            config(&[Interval::Minute5]).with_write_batch_size(4),
        );

        let report = engine
            .sync_interval("NASDAQ", &nasdaq(&["INTC"]), Interval::Minute5, now())
            .await
            .unwrap();
        assert_eq!(report.points_written, 10);
        assert_eq!(engine.store().write_calls(), 3);
    }

    #[tokio::test]
    async fn test_nothing_to_do_when_current() {
        let store = MemoryStore::new();
        store.seed([stored("AAPL", Interval::Day1, now())]);
        let engine = SyncEngine::with_config(ScriptedFetcher::default(), store, config(&[Interval::Day1]));

        let report = engine
            .sync_interval("NASDAQ", &nasdaq(&["AAPL"]), Interval::Day1, now())
            .await
            .unwrap();
        assert!(engine.fetcher().calls().is_empty());
        assert_eq!(report.skipped_batches, 1);
        assert_eq!(report.points_written, 0);
    }

    #[tokio::test]
    async fn test_empty_universe_fails_exchange() {
        let engine = SyncEngine::new(ScriptedFetcher::default(), MemoryStore::new());
        let result = engine.sync_exchange("NYSE", &[], now()).await;
        assert!(matches!(result, Err(SyncError::NoTickersForExchange(ex)) if ex == "NYSE"));
    }

    #[tokio::test]
    async fn test_interval_failure_does_not_stop_others() {
        let fetcher = ScriptedFetcher::default().with_rows("AAPL", vec![bar(now() - TimeDelta::days(1))]);
        let store = FailingStore {
            inner: MemoryStore::new(),
            failing: Interval::Minute5,
        };
        let engine = SyncEngine::with_config(fetcher, store, config(&[Interval::Minute5, Interval::Day1]));

        let report = engine
            .sync_exchange("NASDAQ", &nasdaq(&["AAPL"]), now())
            .await
            .unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].interval, Interval::Minute5);
        assert_eq!(report.intervals.len(), 1);
        assert_eq!(report.intervals[0].interval, Interval::Day1);
        assert_eq!(report.points_written(), 1);
    }
}
