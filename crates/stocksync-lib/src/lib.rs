//! Periodic OHLCV synchronization of ticker universes into a time-series store.
//!
//! This is a facade crate that re-exports functionality from the stocksync
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use stocksync_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = TickerRepository::load_dir("tickers").await?;
//!     let engine = SyncEngine::new(
//!         YahooClient::with_defaults()?,
//!         QuestDbStore::new(StoreConfig::default())?,
//!     );
//!
//!     for exchange in repo.exchanges() {
//!         let now = chrono::Utc::now();
//!         let report = engine.sync_exchange(exchange, &repo.tickers(exchange), now).await?;
//!         println!("{exchange}: {} points", report.points_written());
//!     }
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stocksync/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use stocksync_types::*;

// Re-export the ticker universe
pub use stocksync_tickers::{TickerError, TickerRepository};

// Re-export fetch functionality
pub use stocksync_fetch::{
    ChartClient, ClientConfig, FetchClient, FetchError, FetchOutcome, PriceTable, RequestError,
    YahooClient,
};

// Re-export storage
pub use stocksync_store::{MemoryStore, QuestDbStore, Store, StoreConfig, StoreError, line};

// Re-export the engine
pub use stocksync_engine::{
    Batch, ExchangeReport, IntervalFailure, PointBuilder, RangeSlicer, SliceWindow, SyncConfig,
    SyncEngine, SyncError, SyncPlan, SyncPlanner, SyncReport, WriteBuffer,
};

// Re-export scheduling
#[cfg(feature = "scheduler")]
pub use stocksync_scheduler::{
    LastRuns, Scheduler, SchedulerConfig, Session, SessionCalendar, TradingCalendar, run_once,
};

/// Prelude module for convenient imports.
///
/// ```
/// use stocksync_lib::prelude::*;
/// ```
pub mod prelude {
    pub use stocksync_types::{Interval, IntervalCatalog, IntervalClass, Period, SyncPoint, Ticker};

    pub use stocksync_tickers::TickerRepository;

    pub use stocksync_fetch::{ClientConfig, FetchClient, YahooClient};

    pub use stocksync_store::{MemoryStore, QuestDbStore, Store, StoreConfig};

    pub use stocksync_engine::{ExchangeReport, SyncConfig, SyncEngine, SyncReport};

    #[cfg(feature = "scheduler")]
    pub use stocksync_scheduler::{LastRuns, Scheduler, SchedulerConfig, SessionCalendar};
}
