//! Tickers command implementation.

use anyhow::{Context, Result, bail};
use std::path::Path;
use stocksync_lib::TickerRepository;

/// List the exchanges of the universe, or the symbols of one exchange.
pub(crate) async fn list_tickers(dir: &Path, exchange: Option<&str>) -> Result<()> {
    let repo = TickerRepository::load_dir(dir)
        .await
        .with_context(|| format!("Failed to load tickers from {}", dir.display()))?;

    if let Some(exchange) = exchange {
        let tickers = repo.tickers(exchange);
        if tickers.is_empty() {
            bail!("No tickers for exchange '{exchange}'");
        }
        for ticker in &tickers {
            println!("{}", ticker.symbol());
        }
        println!("\nTotal: {} tickers", tickers.len());
        return Ok(());
    }

    if repo.is_empty() {
        println!("No tickers found.");
        return Ok(());
    }

    println!("{:<15} {:>10}", "EXCHANGE", "TICKERS");
    println!("{}", "-".repeat(26));
    for exchange in repo.exchanges() {
        println!("{:<15} {:>10}", exchange, repo.tickers(exchange).len());
    }

    println!("\nTotal: {} tickers", repo.len());
    Ok(())
}
