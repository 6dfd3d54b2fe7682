//! Plan command implementation.
//!
//! Shows how the next pass would split each exchange's universe, read from
//! the store's current contents. Nothing is fetched or written apart from
//! creating missing interval tables.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use std::path::Path;
use stocksync_lib::{Interval, QuestDbStore, Store, StoreConfig, SyncPlanner, TickerRepository};

use super::health::connect;
use super::run::load_universe;

/// Print the sync plan of every exchange and interval.
pub(crate) async fn show_plan(
    tickers_dir: &Path,
    intervals: &str,
    exchange: Option<&str>,
    store: StoreConfig,
) -> Result<()> {
    let (repo, intervals) = load_universe(tickers_dir, intervals).await?;
    let exchanges: Vec<String> = match exchange {
        Some(exchange) => {
            let exchange = exchange.to_uppercase();
            if repo.tickers(&exchange).is_empty() {
                bail!("No tickers for exchange '{exchange}'");
            }
            vec![exchange]
        }
        None => repo.exchanges().map(str::to_string).collect(),
    };

    let store = connect(store).await?;
    let now = Utc::now();

    println!(
        "{:<10} {:<6} {:>8} {:>8} {:>8} {:>10}  {:<25}",
        "EXCHANGE", "IVL", "NEW", "BATCHES", "SKIPPED", "UNRESOLVED", "OLDEST"
    );
    println!("{}", "-".repeat(82));

    for exchange in &exchanges {
        for &interval in &intervals {
            store
                .ensure_table(interval)
                .await
                .with_context(|| format!("Failed to create table for {interval}"))?;
            print_row(&store, &repo, exchange, interval, now).await?;
        }
    }
    Ok(())
}

async fn print_row(
    store: &QuestDbStore,
    repo: &TickerRepository,
    exchange: &str,
    interval: Interval,
    now: DateTime<Utc>,
) -> Result<()> {
    let existing = store
        .existing_tickers(interval, exchange)
        .await
        .with_context(|| format!("Failed to query {exchange} tickers for {interval}"))?;
    let last_entries = store
        .last_entry_dates(interval)
        .await
        .with_context(|| format!("Failed to query last entries for {interval}"))?;

    let plan = SyncPlanner::plan(&repo.tickers(exchange), &existing, &last_entries, interval, now);
    let oldest = plan
        .batches
        .first()
        .map_or_else(|| "-".to_string(), |batch| batch.date.to_rfc3339());

    println!(
        "{:<10} {:<6} {:>8} {:>8} {:>8} {:>10}  {:<25}",
        exchange,
        interval.as_str(),
        plan.new_tickers.len(),
        plan.batches.len(),
        plan.skipped_batches(),
        plan.unresolved.len(),
        oldest
    );
    Ok(())
}
