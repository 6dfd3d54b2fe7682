//! Sync loop driven by market closes.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use stocksync_engine::{ExchangeReport, SyncEngine};
use stocksync_fetch::FetchClient;
use stocksync_store::Store;
use stocksync_tickers::TickerRepository;

use crate::{LastRuns, TradingCalendar};

/// Timing of the scheduled loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// An exchange is not synchronized again within this gap.
    pub min_rerun_gap: TimeDelta,
    /// Delay after the close before the day's data is complete upstream.
    pub settlement_delay: TimeDelta,
    /// Pause between loop iterations.
    pub sleep_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_rerun_gap: TimeDelta::hours(23) + TimeDelta::minutes(45),
            settlement_delay: TimeDelta::minutes(30),
            sleep_interval: Duration::from_secs(3 * 60 * 60),
        }
    }
}

/// Decides which exchanges are due and runs them through the engine.
#[derive(Debug, Clone)]
pub struct Scheduler<C> {
    calendar: C,
    config: SchedulerConfig,
}

impl<C: TradingCalendar> Scheduler<C> {
    /// Creates a scheduler.
    #[must_use]
    pub const fn new(calendar: C, config: SchedulerConfig) -> Self {
        Self { calendar, config }
    }

    /// Returns the loop timing.
    #[must_use]
    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Returns the exchanges due at `now`.
    ///
    /// An exchange is due when it has not run within `min_rerun_gap`, trades
    /// on the UTC date of `now`, and `now` is past its close plus the
    /// settlement delay.
    pub fn due_exchanges<'a>(
        &self,
        exchanges: impl IntoIterator<Item = &'a str>,
        last_runs: &LastRuns,
        now: DateTime<Utc>,
    ) -> Vec<String> {
        exchanges
            .into_iter()
            .filter(|exchange| !last_runs.ran_within(exchange, now, self.config.min_rerun_gap))
            .filter(|exchange| {
                match self.calendar.market_close(exchange, now.date_naive()) {
                    Some(close) => now > close + self.config.settlement_delay,
                    None => {
                        tracing::debug!(exchange, date = %now.date_naive(), "no session today");
                        false
                    }
                }
            })
            .map(str::to_string)
            .collect()
    }

    /// Runs one loop iteration: syncs every exchange due at `clock()` and
    /// records its run. The clock is read again as each exchange starts.
    pub async fn run_pass<F: FetchClient, S: Store>(
        &self,
        engine: &SyncEngine<F, S>,
        repo: &TickerRepository,
        last_runs: &mut LastRuns,
        clock: impl Fn() -> DateTime<Utc>,
    ) -> Vec<ExchangeReport> {
        let due = self.due_exchanges(repo.exchanges(), last_runs, clock());
        let mut reports = Vec::with_capacity(due.len());
        for exchange in due {
            let now = clock();
            last_runs.record(&exchange, now);
            if let Some(report) = sync_one(engine, repo, &exchange, now).await {
                reports.push(report);
            }
        }
        reports
    }

    /// Loops until `shutdown` resolves, sleeping `sleep_interval` between
    /// iterations. Shutdown is observed between iterations.
    pub async fn run<F: FetchClient, S: Store>(
        &self,
        engine: &SyncEngine<F, S>,
        repo: &TickerRepository,
        last_runs: &mut LastRuns,
        shutdown: impl Future<Output = ()>,
    ) {
        tokio::pin!(shutdown);
        loop {
            self.run_pass(engine, repo, last_runs, Utc::now).await;

            tracing::info!(seconds = self.config.sleep_interval.as_secs(), "sleeping");
            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("shutdown requested, leaving scheduler loop");
                    return;
                }
                () = tokio::time::sleep(self.config.sleep_interval) => {}
            }
        }
    }
}

/// Syncs every exchange of the repository once, regardless of sessions.
///
/// Each exchange is synced up to the `clock()` reading taken when it starts.
pub async fn run_once<F: FetchClient, S: Store>(
    engine: &SyncEngine<F, S>,
    repo: &TickerRepository,
    clock: impl Fn() -> DateTime<Utc>,
) -> Vec<ExchangeReport> {
    let mut reports = Vec::new();
    for exchange in repo.exchanges() {
        if let Some(report) = sync_one(engine, repo, exchange, clock()).await {
            reports.push(report);
        }
    }
    reports
}

async fn sync_one<F: FetchClient, S: Store>(
    engine: &SyncEngine<F, S>,
    repo: &TickerRepository,
    exchange: &str,
    now: DateTime<Utc>,
) -> Option<ExchangeReport> {
    tracing::info!(exchange, "starting sync");
    match engine.sync_exchange(exchange, &repo.tickers(exchange), now).await {
        Ok(report) => {
            tracing::info!(
                exchange,
                points = report.points_written(),
                failed_intervals = report.failures.len(),
                "finished sync"
            );
            Some(report)
        }
        Err(e) => {
            tracing::error!(exchange, error = %e, "sync failed");
            None
        }
    }
}
