//! Shared utilities for Kotozute binaries.

pub mod logger;
pub mod time;
