//! Configuration structures for Opengear clients.
//!
//! This module describes how a client reaches an appliance: the host, port,
//! API prefix and transport security settings that together form the base URL.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;
use validator::{Validate, ValidationError};

/// Default HTTPS port of the appliance REST API.
pub const DEFAULT_PORT: u16 = 443;

/// Default API path prefix.
pub const DEFAULT_API_PREFIX: &str = "/api/v1.8";

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// URL scheme used to reach the appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// TLS transport, the only scheme real appliances serve.
    #[default]
    Https,
    /// Plain HTTP, for local test doubles.
    Http,
}

impl Scheme {
    /// Returns the scheme as it appears in a URL.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for a single appliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ApplianceConfig {
    /// IP address or hostname, without scheme
    #[validate(length(min = 1))]
    pub host: String,

    /// TCP port of the REST API
    #[validate(range(min = 1))]
    #[serde(default = "default_port")]
    pub port: u16,

    /// API path prefix, e.g. `/api/v1.8`
    #[validate(custom(function = "validate_api_prefix"))]
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// URL scheme
    #[serde(default)]
    pub scheme: Scheme,

    /// Whether to verify TLS certificates
    #[serde(default)]
    pub tls_verify: bool,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn validate_api_prefix(prefix: &str) -> Result<(), ValidationError> {
    if prefix.starts_with('/') && !prefix.ends_with('/') {
        Ok(())
    } else {
        let mut error = ValidationError::new("api_prefix");
        error.message = Some("API prefix must start with `/` and not end with one".into());
        Err(error)
    }
}

impl ApplianceConfig {
    /// Create a configuration for the given host with default settings.
    ///
    /// Certificate verification is disabled by default since appliances
    /// usually ship with self-signed certificates.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            api_prefix: default_api_prefix(),
            scheme: Scheme::default(),
            tls_verify: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Set the TCP port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the API path prefix.
    #[must_use]
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Set the URL scheme.
    #[must_use]
    pub const fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Compose the base URL: `{scheme}://{host}:{port}{api_prefix}`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.scheme, self.host, self.port, self.api_prefix
        )
    }

    /// Validate the settings and parse the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] when a field is out of range and
    /// [`Error::ConfigError`] when the composed URL does not parse.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        self.validate()?;
        Url::parse(&self.base_url())
            .map_err(|e| Error::ConfigError(format!("Invalid appliance URL: {e}")))
    }
}
