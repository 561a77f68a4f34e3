//! Block pipeline orchestration.
//!
//! This module provides:
//! - The [`PipelineDriver`], which fans a block's transactions and logs out
//!   through filter, ABI resolution, decode, classification, and persistence
//! - The [`BlockWatcher`] trigger modes: single-block runs and a polling
//!   watch loop with a bounded queue and settling delay
//! - Pipeline error types

mod driver;
mod error;
mod watcher;

pub use driver::{BlockReport, PipelineDriver};
pub use error::PipelineError;
pub use watcher::BlockWatcher;
