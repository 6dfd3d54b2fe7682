//! Synthetic inputs for stocksync benchmarks.

use std::collections::{BTreeSet, HashMap};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use stocksync_lib::{Interval, PriceRow, SyncPoint, Ticker};

/// Fixed reference instant so runs are comparable.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 14, 22, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Generates `count` tickers on `exchange` named `T000000`, `T000001`, ...
pub fn universe(exchange: &str, count: usize) -> Vec<Ticker> {
    (0..count)
        .map(|i| Ticker::new(format!("T{i:06}"), exchange))
        .collect()
}

/// Store state for a universe where every `new_every`-th ticker was never
/// stored and the rest spread their last entry over `groups` distinct days.
pub fn store_state(
    universe: &[Ticker],
    new_every: usize,
    groups: usize,
    now: DateTime<Utc>,
) -> (BTreeSet<String>, HashMap<String, DateTime<Utc>>) {
    let mut existing = BTreeSet::new();
    let mut last_entries = HashMap::new();
    for (i, ticker) in universe.iter().enumerate() {
        if new_every > 0 && i % new_every == 0 {
            continue;
        }
        let days_back = 2 + (i % groups.max(1)) as i64;
        existing.insert(ticker.symbol().to_string());
        last_entries.insert(ticker.symbol().to_string(), now - TimeDelta::days(days_back));
    }
    (existing, last_entries)
}

/// Generates `count` consecutive bars of `interval` starting at `start`.
///
/// Every tenth row misses its volume, like a provider null gap.
pub fn rows(count: usize, interval: Interval, start: DateTime<Utc>) -> Vec<PriceRow> {
    let step = interval.duration();
    (0..count)
        .map(|i| {
            let price = 100.0 + (i % 50) as f64 * 0.25;
            let mut row = PriceRow::complete(
                start + step * i as i32,
                price,
                price + 1.0,
                price - 1.0,
                price + 0.5,
                price + 0.5,
                1_000 + i as i64,
            );
            if i % 10 == 9 {
                row.volume = None;
            }
            row
        })
        .collect()
}

/// Generates `count` points spread over a handful of tickers.
pub fn points(count: usize, interval: Interval, start: DateTime<Utc>) -> Vec<SyncPoint> {
    let step = interval.duration();
    (0..count)
        .map(|i| SyncPoint {
            exchange: "NASDAQ".to_string(),
            ticker: format!("T{:03}", i % 100),
            interval,
            timestamp: start + step * (i / 100) as i32,
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.5,
            adj_close: 100.5,
            volume: 1_000 + i as i64,
        })
        .collect()
}

/// Writes one CSV symbol list per exchange into `dir`.
///
/// # Errors
///
/// Returns an error if a file cannot be written.
pub fn write_ticker_dir(
    dir: &Path,
    exchanges: &[&str],
    per_exchange: usize,
) -> std::io::Result<()> {
    for exchange in exchanges {
        let mut file = std::fs::File::create(dir.join(format!("{exchange}.csv")))?;
        writeln!(file, "symbol,name")?;
        for i in 0..per_exchange {
            writeln!(file, "T{i:06},Company {i}")?;
        }
    }
    Ok(())
}
