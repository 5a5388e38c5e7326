//! Authenticator
//!
//! Turns a credential into a session (local allow-list or remote backend)
//! and is the only writer of the session store.

use log::{info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::credentials::{Credential, LOCAL_SESSION_TOKEN};
use super::mode::AuthMode;
use super::remote::RemoteAuthClient;
use super::validator::{validate_input, validate_local};
use crate::config::PortalConfig;
use crate::error::AuthError;
use crate::session::{Session, SessionStore};

/// Knobs that do not change the mode.
#[derive(Debug, Clone)]
pub struct AuthOptions {
    pub request_timeout: Duration,
    pub max_credential_length: usize,
    /// Reject a login while another is pending instead of letting the last one win.
    pub serialize_logins: bool,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            max_credential_length: 256,
            serialize_logins: false,
        }
    }
}

impl From<&PortalConfig> for AuthOptions {
    fn from(config: &PortalConfig) -> Self {
        Self {
            request_timeout: config.request_timeout(),
            max_credential_length: config.max_credential_length,
            serialize_logins: config.serialize_logins,
        }
    }
}

enum Backend {
    Local,
    Remote(RemoteAuthClient),
}

pub struct Authenticator {
    mode: AuthMode,
    backend: Backend,
    store: Arc<SessionStore>,
    options: AuthOptions,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the login attempt ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Authenticator {
    pub fn new(
        mode: AuthMode,
        store: Arc<SessionStore>,
        options: AuthOptions,
    ) -> Result<Self, AuthError> {
        let backend = match &mode {
            AuthMode::Local => Backend::Local,
            AuthMode::Remote(url) => {
                Backend::Remote(RemoteAuthClient::new(url, options.request_timeout)?)
            }
        };

        info!("Authenticator running in {} mode", mode);
        Ok(Self {
            mode,
            backend,
            store,
            options,
            in_flight: AtomicBool::new(false),
        })
    }

    pub fn mode(&self) -> &AuthMode {
        &self.mode
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Authenticate and, on success only, replace the stored session.
    pub async fn login(&self, credential: &Credential) -> Result<Session, AuthError> {
        let _guard = self.begin_login()?;

        let result = self.authenticate(credential).await;
        match &result {
            Ok(session) => {
                if let Some(identity) = session.identity() {
                    info!("Login succeeded for {} ({})", identity.email, identity.role);
                }
                self.store.set(session.clone());
            }
            Err(e) => warn!("Login failed for {}: {}", credential.identifier, e),
        }
        result
    }

    /// Drop the current session. Always succeeds; a no-op when already anonymous.
    pub fn logout(&self) {
        if let Some(identity) = self.store.get().identity() {
            info!("Logging out {}", identity.email);
        }
        self.store.clear();
    }

    async fn authenticate(&self, credential: &Credential) -> Result<Session, AuthError> {
        validate_input(credential, self.options.max_credential_length)?;

        match &self.backend {
            Backend::Local => {
                let identity = validate_local(credential)?;
                Ok(Session::authenticated(identity, LOCAL_SESSION_TOKEN))
            }
            Backend::Remote(client) => client.login(credential).await,
        }
    }

    fn begin_login(&self) -> Result<Option<InFlight<'_>>, AuthError> {
        if !self.options.serialize_logins {
            return Ok(None);
        }

        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Some(InFlight(&self.in_flight)))
            .map_err(|_| AuthError::LoginInProgress)
    }
}
