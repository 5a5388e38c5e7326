//! Session store
//!
//! Single holder of the current session. Persists every change to the
//! key-value backend and broadcasts it to subscribers.

use log::{debug, error, info, warn};
use tokio::sync::watch;

use crate::error::{HydrationError, StorageError};
use crate::session::model::{Identity, Session};
use crate::storage::KeyValueStore;

/// Persisted key holding the opaque session token.
pub const TOKEN_KEY: &str = "token";

/// Persisted key holding the serialized identity.
pub const USER_KEY: &str = "user";

pub struct SessionStore {
    backend: Box<dyn KeyValueStore>,
    current: watch::Sender<Session>,
}

impl SessionStore {
    /// Create the store and hydrate it from `backend`.
    ///
    /// Anything that does not restore to a complete session leaves the store
    /// anonymous; the failure is only logged.
    pub fn init(backend: impl KeyValueStore + 'static) -> Self {
        let backend: Box<dyn KeyValueStore> = Box::new(backend);

        let session = match hydrate(backend.as_ref()) {
            Ok(session) => session,
            Err(e) => {
                warn!("Discarding persisted session: {}", e);
                discard_persisted(backend.as_ref());
                Session::anonymous()
            }
        };

        match session.identity() {
            Some(identity) => info!(
                "Restored session for {} ({})",
                identity.email, identity.role
            ),
            None => debug!("No persisted session, starting anonymous"),
        }

        let (current, _) = watch::channel(session);
        Self { backend, current }
    }

    /// Current session.
    pub fn get(&self) -> Session {
        self.current.borrow().clone()
    }

    /// Receiver notified on every `set`/`clear`.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.current.subscribe()
    }

    /// Replace the session, persist it, and notify subscribers.
    pub(crate) fn set(&self, session: Session) {
        let (identity, token) = match (session.identity(), session.token()) {
            (Some(identity), Some(token)) => (identity, token),
            _ => return self.clear(),
        };

        // A partial write could pair this token with an older identity.
        if let Err(e) = persist(self.backend.as_ref(), identity, token) {
            error!("Failed to persist session for {}: {}", identity.email, e);
            discard_persisted(self.backend.as_ref());
        }

        self.current.send_replace(session);
    }

    /// Drop the session and its persisted copy.
    pub(crate) fn clear(&self) {
        discard_persisted(self.backend.as_ref());
        self.current.send_replace(Session::anonymous());
    }
}

fn hydrate(backend: &dyn KeyValueStore) -> Result<Session, HydrationError> {
    let token = backend.get(TOKEN_KEY)?;
    let user = backend.get(USER_KEY)?;

    // "null" is what a cleared identity serializes to.
    let identity: Option<Identity> = match user {
        Some(raw) => serde_json::from_str(&raw)?,
        None => None,
    };

    match (identity, token) {
        (None, None) => Ok(Session::anonymous()),
        (Some(_), None) => Err(HydrationError::MissingToken),
        (None, Some(_)) => Err(HydrationError::MissingUser),
        (Some(_), Some(token)) if token.is_empty() => Err(HydrationError::EmptyToken),
        (Some(identity), Some(token)) => Ok(Session::authenticated(identity, token)),
    }
}

fn persist(
    backend: &dyn KeyValueStore,
    identity: &Identity,
    token: &str,
) -> Result<(), StorageError> {
    let user = serde_json::to_string(identity)?;
    backend.set(TOKEN_KEY, token)?;
    backend.set(USER_KEY, &user)?;
    Ok(())
}

fn discard_persisted(backend: &dyn KeyValueStore) {
    for key in [TOKEN_KEY, USER_KEY] {
        if let Err(e) = backend.remove(key) {
            error!("Failed to remove persisted {}: {}", key, e);
        }
    }
}
