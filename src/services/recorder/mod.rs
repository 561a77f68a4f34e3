//! Recorder service for persisting classified records.
//!
//! This module provides:
//! - A [`DocumentStore`] trait over partitioned, refresh-on-write storage
//! - An Elasticsearch-compatible HTTP implementation
//! - The [`Recorder`], which builds normalized records and routes them to
//!   category partitions

mod error;
mod recorder;
mod store;

pub use error::PersistenceError;
pub use recorder::Recorder;
pub use store::{DocumentStore, ElasticStore};
