//! Market data fetching for the stocksync price synchronizer.
//!
//! This crate provides the fetch side of a sync run:
//!
//! - [`FetchClient`] - Multi-symbol OHLCV source consumed by the engine
//! - [`YahooClient`] - Yahoo Finance chart API implementation
//! - [`ChartClient`] - HTTP client with connection pooling and retries
//! - [`url::chart_url`] - Chart API URL construction
//! - [`parse_chart`] - Chart document decoding

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stocksync/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod chart;
mod client;
mod source;
pub mod url;
mod yahoo;

pub use chart::{ChartError, parse_chart};
pub use client::{ChartClient, ClientConfig, DEFAULT_BASE_URL, RequestError};
pub use source::{FetchClient, FetchError, FetchOutcome, PriceTable};
pub use yahoo::YahooClient;
