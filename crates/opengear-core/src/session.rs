//! Credentials and session state.
//!
//! A client is either unauthenticated or holds an [`AuthenticatedSession`]:
//! the header set, built from the token issued by the appliance, that every
//! later request sends. There is no state in which a token exists without
//! its headers.

use crate::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// Username and password presented to `POST /sessions`.
#[derive(Debug)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Create credentials from a username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Get the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Build the JSON body of the login request.
    #[must_use]
    pub fn login_request(&self) -> LoginRequest<'_> {
        LoginRequest {
            username: &self.username,
            password: self.password.expose_secret(),
        }
    }
}

/// Body of `POST /sessions`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    /// Account name
    pub username: &'a str,
    /// Account password
    pub password: &'a str,
}

/// Opaque session token issued by the appliance.
#[derive(Debug)]
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Wrap a token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Reveal the token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// A logged-in session: the standing request headers.
#[derive(Debug)]
pub struct AuthenticatedSession {
    headers: HeaderMap,
}

impl AuthenticatedSession {
    /// Build the standing header set for a token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] if the token cannot be sent as a header value.
    pub fn new(token: &SessionToken) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Token {}", token.expose()))
            .map_err(|err| {
                Error::ParseError(format!("session token is not a valid header value: {err}"))
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self { headers })
    }

    /// Headers attached to every authenticated request.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Authentication state of a client.
#[derive(Debug, Default)]
pub enum SessionState {
    /// No session; requests are not issued.
    #[default]
    Unauthenticated,
    /// Logged in.
    Authenticated(AuthenticatedSession),
}

impl SessionState {
    /// Returns true when a session is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The standing headers, if authenticated.
    #[must_use]
    pub const fn headers(&self) -> Option<&HeaderMap> {
        match self {
            Self::Authenticated(session) => Some(session.headers()),
            Self::Unauthenticated => None,
        }
    }
}
