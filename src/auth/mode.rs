//! Authentication mode
//!
//! Chosen once at startup and fixed for the lifetime of the authenticator.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Built-in allow-list, no network.
    Local,
    /// Delegate to the backend at this base URL.
    Remote(String),
}

impl AuthMode {
    /// Remote when a non-blank base URL is given, local otherwise.
    pub fn from_api_url(api_url: Option<&str>) -> Self {
        match api_url.map(str::trim) {
            Some(url) if !url.is_empty() => {
                AuthMode::Remote(url.trim_end_matches('/').to_string())
            }
            _ => AuthMode::Local,
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Local => write!(f, "local"),
            AuthMode::Remote(url) => write!(f, "remote ({url})"),
        }
    }
}
