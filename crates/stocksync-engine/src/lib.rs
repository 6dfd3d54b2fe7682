//! Synchronization core of the stocksync price synchronizer.
//!
//! A pass over one exchange and interval:
//!
//! 1. [`SyncPlanner`] splits the universe into never-stored tickers and
//!    batches sharing a last-entry instant.
//! 2. New tickers are backfilled; batches are updated from their last entry.
//!    Long intraday ranges go through [`RangeSlicer`].
//! 3. [`PointBuilder`] turns fetched rows into points, dropping incomplete
//!    rows and anything not after the batch's last entry.
//! 4. [`WriteBuffer`] writes the points in bounded batches.
//!
//! [`SyncEngine`] drives these steps and reports per pass.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stocksync/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod buffer;
mod builder;
mod config;
mod engine;
mod planner;
mod report;
mod slicer;

pub use buffer::WriteBuffer;
pub use builder::PointBuilder;
pub use config::SyncConfig;
pub use engine::{SyncEngine, SyncError};
pub use planner::{Batch, SyncPlan, SyncPlanner};
pub use report::{ExchangeReport, IntervalFailure, SyncReport};
pub use slicer::{RangeSlicer, SliceWindow};
