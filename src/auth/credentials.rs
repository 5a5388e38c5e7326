//! Credentials and the local allow-list
//!
//! Holds the credential type and the built-in accounts accepted in local mode.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::session::{Identity, Role};

/// Token issued for every local-mode login.
pub const LOCAL_SESSION_TOKEN: &str = "local-session-token";

/// User-supplied login input. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub identifier: String,
    pub secret: String,
    pub role: Option<Role>,
}

impl Credential {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
            role: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

pub(crate) struct LocalAccount {
    pub secret: &'static str,
    pub identity: Identity,
}

/// Static allow-list used when no remote endpoint is configured.
pub(crate) static LOCAL_ACCOUNTS: LazyLock<HashMap<&'static str, LocalAccount>> =
    LazyLock::new(|| {
        let mut accounts = HashMap::new();
        accounts.insert(
            "admin@admin.com",
            LocalAccount {
                secret: "password",
                identity: Identity {
                    id: 1,
                    display_name: "Admin User".to_string(),
                    email: "admin@admin.com".to_string(),
                    role: Role::Admin,
                },
            },
        );
        accounts.insert(
            "user@user.com",
            LocalAccount {
                secret: "password",
                identity: Identity {
                    id: 2,
                    display_name: "Regular User".to_string(),
                    email: "user@user.com".to_string(),
                    role: Role::User,
                },
            },
        );
        accounts
    });
