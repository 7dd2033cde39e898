//! Shared utilities for Heya packages: logging setup and time helpers.

pub mod logger;
pub mod time;
