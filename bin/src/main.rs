//! stocksync CLI - periodic OHLCV synchronization into QuestDB.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use stocksync_lib::StoreConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;

use commands::run::Mode;

#[derive(Parser)]
#[command(name = "stocksync")]
#[command(about = "Synchronize OHLCV price series of a ticker universe into QuestDB", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Debug logging
    #[arg(long, env = "STOCKSYNC_DEBUG", global = true)]
    debug: bool,
}

/// QuestDB connection options.
#[derive(Args)]
struct StoreArgs {
    /// QuestDB host
    #[arg(long = "questdb-host", env = "STOCKSYNC_QUESTDB_HOST", default_value = "localhost")]
    host: String,

    /// QuestDB HTTP port (REST and line protocol)
    #[arg(long = "questdb-port", env = "STOCKSYNC_QUESTDB_PORT", default_value_t = 9000)]
    port: u16,

    /// QuestDB monitoring port
    #[arg(
        long = "questdb-monitoring-port",
        env = "STOCKSYNC_QUESTDB_MONITORING_PORT",
        default_value_t = 9003
    )]
    monitoring_port: u16,
}

impl StoreArgs {
    fn into_config(self) -> StoreConfig {
        StoreConfig {
            host: self.host,
            http_port: self.port,
            monitoring_port: self.monitoring_port,
            ..StoreConfig::default()
        }
    }
}

/// Ticker universe and interval options.
#[derive(Args)]
struct UniverseArgs {
    /// Directory of per-exchange ticker CSV files
    #[arg(short, long, env = "STOCKSYNC_TICKERS_DIR", default_value = "tickers")]
    tickers_dir: PathBuf,

    /// Comma-separated interval codes
    #[arg(short, long, env = "STOCKSYNC_INTERVALS", default_value = "5m,1d")]
    intervals: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Synchronize every exchange once, or loop on market closes
    Run {
        #[command(flatten)]
        universe: UniverseArgs,

        #[command(flatten)]
        store: StoreArgs,

        /// Run mode
        #[arg(short, long, value_enum, env = "STOCKSYNC_MODE", default_value = "single")]
        mode: Mode,

        /// Seconds between scheduled passes
        #[arg(long, env = "STOCKSYNC_SLEEPTIME", default_value_t = 10_800)]
        sleeptime: u64,
    },

    /// Show what the next pass would fetch, without fetching
    Plan {
        #[command(flatten)]
        universe: UniverseArgs,

        #[command(flatten)]
        store: StoreArgs,

        /// Restrict to one exchange
        #[arg(short, long)]
        exchange: Option<String>,
    },

    /// List supported intervals
    Intervals,

    /// List the ticker universe
    Tickers {
        /// Directory of per-exchange ticker CSV files
        #[arg(short, long, env = "STOCKSYNC_TICKERS_DIR", default_value = "tickers")]
        tickers_dir: PathBuf,

        /// List the symbols of one exchange
        #[arg(short, long)]
        exchange: Option<String>,
    },

    /// Check QuestDB health
    Health {
        #[command(flatten)]
        store: StoreArgs,
    },
}

fn init_tracing(verbose: u8, quiet: bool, debug: bool) {
    let level = if quiet {
        "warn"
    } else {
        match (verbose, debug) {
            (0, false) => "info",
            (0 | 1, _) => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet, cli.debug);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Run {
            universe,
            store,
            mode,
            sleeptime,
        } => {
            commands::run::run(
                &universe.tickers_dir,
                &universe.intervals,
                mode,
                sleeptime,
                store.into_config(),
            )
            .await
        }
        Commands::Plan {
            universe,
            store,
            exchange,
        } => {
            commands::plan::show_plan(
                &universe.tickers_dir,
                &universe.intervals,
                exchange.as_deref(),
                store.into_config(),
            )
            .await
        }
        Commands::Intervals => {
            commands::intervals::list_intervals();
            Ok(())
        }
        Commands::Tickers {
            tickers_dir,
            exchange,
        } => commands::tickers::list_tickers(&tickers_dir, exchange.as_deref()).await,
        Commands::Health { store } => commands::health::health(store.into_config()).await,
    }
}
