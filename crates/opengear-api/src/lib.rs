//! Opengear REST API client.
//!
//! This crate provides typed models and a blocking client for the Opengear
//! console server REST API: session login plus read-only accessors for the
//! firmware version, node description, serial ports and cellular modem status.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{ApplianceApi, OpengearClient, OpengearClientBuilder};
pub use models::{
    builtin_uart_labels, ModemLink, ModemStatus, NodeDescription, SerialPort, SystemVersion,
    WwanStatus, BUILTIN_UART,
};

/// Convenient result alias that reuses the shared Opengear error type.
pub type Result<T> = opengear_core::Result<T>;
