//! Report configuration.
//!
//! Settings are resolved in priority order: placeholder defaults, then an
//! optional TOML file, then environment variables and command-line flags.

use crate::cli::Cli;
use anyhow::{Context, Result};
use opengear_core::{ApplianceConfig, Credentials};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder host used when none is configured.
pub const DEFAULT_HOST: &str = "hostname";
/// Placeholder username used when none is configured.
pub const DEFAULT_USERNAME: &str = "username";
/// Placeholder password used when none is configured.
pub const DEFAULT_PASSWORD: &str = "password";

/// Contents of a report configuration file.
///
/// ```toml
/// host = "10.0.0.1"
/// port = 8443
/// username = "root"
/// ```
///
/// Passwords are never read from the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
    /// Connection settings
    #[serde(flatten)]
    pub appliance: ApplianceConfig,

    /// Login name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl FileConfig {
    /// Load and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Fully resolved settings for one report run.
#[derive(Debug)]
pub struct Settings {
    /// Connection settings
    pub appliance: ApplianceConfig,
    /// Login credentials
    pub credentials: Credentials,
}

impl Settings {
    /// Resolve settings from the command line, loading `--config` if given.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = cli.config.as_deref().map(FileConfig::load).transpose()?;
        Ok(Self::merge(cli, file))
    }

    /// Apply command-line overrides on top of an optional file configuration.
    #[must_use]
    pub fn merge(cli: &Cli, file: Option<FileConfig>) -> Self {
        let (mut appliance, file_username) = match file {
            Some(file) => (file.appliance, file.username),
            None => (ApplianceConfig::new(DEFAULT_HOST), None),
        };

        if let Some(host) = &cli.host {
            appliance.host.clone_from(host);
        }
        if let Some(port) = cli.port {
            appliance.port = port;
        }
        if let Some(prefix) = &cli.api_prefix {
            appliance.api_prefix.clone_from(prefix);
        }
        if let Some(timeout) = cli.timeout {
            appliance.request_timeout_secs = timeout;
        }
        if let Some(verify) = cli.tls_verify {
            appliance.tls_verify = verify;
        }

        let username = cli
            .username
            .clone()
            .or(file_username)
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let password = cli
            .password
            .clone()
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

        Self {
            appliance,
            credentials: Credentials::new(username, password),
        }
    }
}
