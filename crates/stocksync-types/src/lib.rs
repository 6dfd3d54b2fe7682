//! Core types for the stocksync price synchronizer.
//!
//! This crate provides the data structures shared by every stocksync crate:
//!
//! - [`Interval`] - Provider sampling interval with its class and duration
//! - [`IntervalCatalog`] - String-keyed lookups into the interval table
//! - [`Period`] - Provider lookback keyword
//! - [`Ticker`] - Symbol listed on an exchange
//! - [`PriceRow`] - One OHLCV row as returned by the fetch client
//! - [`SyncPoint`] - One validated, UTC-normalized storage point

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stocksync/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod interval;
mod point;
mod ticker;

pub use error::UnknownInterval;
pub use interval::{Interval, IntervalCatalog, IntervalClass, Period};
pub use point::{PriceRow, RowTimestamp, SyncPoint, VOLUME_CEILING};
pub use ticker::Ticker;
