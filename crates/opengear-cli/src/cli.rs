//! Command-line arguments.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Print a summary of an Opengear appliance: firmware version, device
/// identity, built-in serial port labels and cellular modem status.
#[derive(Parser, Debug, Clone)]
#[command(name = "opengear-report", version, about, long_about = None)]
pub struct Cli {
    /// Appliance IP address or hostname
    #[arg(long, env = "OPENGEAR_HOST")]
    pub host: Option<String>,

    /// REST API port
    #[arg(long, env = "OPENGEAR_PORT")]
    pub port: Option<u16>,

    /// API path prefix
    #[arg(long, env = "OPENGEAR_API_PREFIX")]
    pub api_prefix: Option<String>,

    /// Login name
    #[arg(short, long, env = "OPENGEAR_USERNAME")]
    pub username: Option<String>,

    /// Login password
    #[arg(short, long, env = "OPENGEAR_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Verify the appliance TLS certificate (`true` or `false`)
    #[arg(long, env = "OPENGEAR_TLS_VERIFY", action = ArgAction::Set)]
    pub tls_verify: Option<bool>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// TOML configuration file
    #[arg(short, long, env = "OPENGEAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
