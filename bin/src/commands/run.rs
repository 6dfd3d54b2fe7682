//! Run command implementation.
//!
//! Single mode syncs every exchange of the universe once and exits. Scheduled
//! mode loops, syncing each exchange after its market close, until Ctrl-C.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::ValueEnum;
use std::path::Path;
use std::time::Duration;
use stocksync_lib::prelude::*;
use stocksync_lib::run_once;

use super::health::connect;

/// How the synchronizer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Mode {
    /// Sync every exchange once, then exit
    Single,
    /// Loop, syncing exchanges after their market close
    Scheduled,
}

/// Parse the interval list and load the ticker universe.
pub(crate) async fn load_universe(
    tickers_dir: &Path,
    intervals: &str,
) -> Result<(TickerRepository, Vec<Interval>)> {
    let intervals = Interval::parse_list(intervals)
        .with_context(|| format!("Invalid interval list '{intervals}'"))?;
    if intervals.is_empty() {
        bail!("No intervals configured");
    }

    let repo = TickerRepository::load_dir(tickers_dir)
        .await
        .with_context(|| format!("Failed to load tickers from {}", tickers_dir.display()))?;
    if repo.is_empty() {
        bail!("No tickers found in {}", tickers_dir.display());
    }
    Ok((repo, intervals))
}

/// Run the synchronizer.
pub(crate) async fn run(
    tickers_dir: &Path,
    intervals: &str,
    mode: Mode,
    sleeptime: u64,
    store: StoreConfig,
) -> Result<()> {
    let (repo, intervals) = load_universe(tickers_dir, intervals).await?;
    tracing::info!(
        exchanges = repo.exchanges().count(),
        tickers = repo.len(),
        intervals = ?intervals.iter().map(Interval::as_str).collect::<Vec<_>>(),
        ?mode,
        "starting"
    );

    let store = connect(store).await?;
    let fetcher = YahooClient::with_defaults().context("Failed to create HTTP client")?;
    let engine =
        SyncEngine::with_config(fetcher, store, SyncConfig::default().with_intervals(intervals));

    match mode {
        Mode::Single => {
            let reports = run_once(&engine, &repo, Utc::now).await;
            print_summary(&reports);
        }
        Mode::Scheduled => {
            let scheduler = Scheduler::new(
                SessionCalendar::default(),
                SchedulerConfig {
                    sleep_interval: Duration::from_secs(sleeptime),
                    ..SchedulerConfig::default()
                },
            );
            let mut last_runs = LastRuns::new();
            scheduler
                .run(&engine, &repo, &mut last_runs, shutdown_signal())
                .await;
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

fn print_summary(reports: &[ExchangeReport]) {
    for report in reports {
        for interval in &report.intervals {
            println!("{interval}");
        }
        for failure in &report.failures {
            println!("{} {}: failed: {}", report.exchange, failure.interval, failure.error);
        }
    }

    let points: usize = reports.iter().map(ExchangeReport::points_written).sum();
    let failed = reports.iter().filter(|r| !r.is_success()).count();
    println!(
        "\nTotal: {points} points written across {} exchanges ({failed} with failures)",
        reports.len()
    );
}
