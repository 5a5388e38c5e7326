//! Session data model
//!
//! Defines roles, the authenticated identity, and the session that pairs an
//! identity with its token.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two roles a principal can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// The authenticated principal.
///
/// Persisted and exchanged as `{id, name, email, role}`; `displayName` is
/// accepted in place of `name` when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    #[serde(rename = "name", alias = "displayName")]
    pub display_name: String,
    pub email: String,
    pub role: Role,
}

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState<'a> {
    Anonymous,
    Authenticated(&'a Identity),
}

/// Current credential and identity, or neither.
///
/// Identity and token travel together, so a session with only one of them
/// cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    inner: Option<(Identity, String)>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { inner: None }
    }

    pub fn authenticated(identity: Identity, token: impl Into<String>) -> Self {
        Self {
            inner: Some((identity, token.into())),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.inner.as_ref().map(|(identity, _)| identity)
    }

    pub fn token(&self) -> Option<&str> {
        self.inner.as_ref().map(|(_, token)| token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.is_some()
    }

    pub fn state(&self) -> SessionState<'_> {
        match self.identity() {
            Some(identity) => SessionState::Authenticated(identity),
            None => SessionState::Anonymous,
        }
    }
}
