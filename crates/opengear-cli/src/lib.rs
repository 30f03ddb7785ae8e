//! Command-line report for Opengear appliances.
//!
//! Connects to one appliance and prints its firmware version, device
//! identity, built-in serial port labels and cellular modem status.

#![deny(missing_docs)]

pub mod cli;
pub mod config;
pub mod report;

pub use cli::Cli;
pub use config::{FileConfig, Settings};
pub use report::write_report;
