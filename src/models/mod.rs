//! Domain models and data structures for the log extraction pipeline.
//!
//! This module contains all the core data structures used throughout the
//! application:
//!
//! - `blockchain`: EVM wire shapes (blocks, transactions, logs, resolved ABIs)
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (categories, the persisted record)

mod blockchain;
mod config;
mod core;

pub use blockchain::evm::{AbiEntry, Block, Log, Transaction};

pub use config::{AppConfig, ConfigError};

pub use core::{Category, ClassifiedRecord, RecordKind, TimestampSource, TransactionStatus};
