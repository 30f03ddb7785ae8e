//! # opengear-core
//!
//! Core types shared by Opengear appliance clients.
//!
//! ## Modules
//!
//! - [`error`] - Error type separating transport failures from everything else
//! - [`config`] - Connection settings and base URL composition
//! - [`session`] - Credentials, session tokens and authentication state

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use config::{ApplianceConfig, Scheme};
pub use error::{Error, Result};
pub use session::{AuthenticatedSession, Credentials, SessionState, SessionToken};
