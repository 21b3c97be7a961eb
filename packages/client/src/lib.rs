//! Command-line client for the relay.

pub mod command;
pub mod error;
mod runner;

pub use runner::{ClientArgs, connect_url, run_client};
