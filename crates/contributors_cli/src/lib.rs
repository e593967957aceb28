//! site-contributors CLI library exports for integration testing.
//!
//! This module exposes command implementations and host wiring for use in tests.

pub mod commands;
pub mod config;
pub mod errors;
pub mod host;
