//! Utility modules for common functionality.
//!
//! This module provides:
//! - Structured error context and trace ids for service errors
//! - Prometheus metric counters
//! - Test builder helpers shared with the integration tests

pub mod logging;
pub mod metrics;
pub mod tests;
