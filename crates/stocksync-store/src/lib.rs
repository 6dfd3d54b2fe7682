//! Time-series storage for the stocksync price synchronizer.
//!
//! This crate provides:
//!
//! - [`Store`] - The storage contract consumed by the sync engine
//! - [`QuestDbStore`] - QuestDB over REST queries and line-protocol writes
//! - [`MemoryStore`] - In-process store keyed by point identity
//! - [`line`] - InfluxDB line protocol encoding

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/stocksync/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod line;
mod memory;
mod questdb;
mod store;

pub use memory::MemoryStore;
pub use questdb::{QuestDbStore, StoreConfig};
pub use store::{Store, StoreError};
