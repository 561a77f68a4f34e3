//! EVM log extraction pipeline.
//!
//! Ingests blocks from a chain data source, tests each transaction's
//! recipient for deployed contract code, resolves contract ABIs from an
//! external registry, decodes call inputs and emitted event logs, classifies
//! every outcome into a terminal category, and persists one tagged record per
//! outcome into that category's store partition.
//!
//! Organized into:
//! - `models`: wire shapes, configuration, and core record types
//! - `services`: collaborator clients and the pipeline stages
//! - `utils`: error context, metrics, and test builders

pub mod models;
pub mod services;
pub mod utils;
