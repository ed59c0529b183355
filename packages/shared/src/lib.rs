//! Shared utilities for Hiroba crates: logger setup and time helpers.

pub mod logger;
pub mod time;
