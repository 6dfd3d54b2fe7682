//! Scheduled mode of the stocksync price synchronizer.
//!
//! The loop wakes up periodically, picks every exchange whose market has
//! closed (plus a settlement delay) and that has not run in the last day,
//! and syncs it. Last runs live in an explicit [`LastRuns`] map owned by the
//! caller.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stocksync/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod calendar;
mod runs;
mod scheduler;

pub use calendar::{Session, SessionCalendar, TradingCalendar};
pub use runs::LastRuns;
pub use scheduler::{Scheduler, SchedulerConfig, run_once};
