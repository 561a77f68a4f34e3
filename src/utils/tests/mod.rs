//! Test helper utilities shared between unit and integration tests.

pub mod builders;
