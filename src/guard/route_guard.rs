//! Route guard
//!
//! Pure role check deciding whether the current session may see a protected
//! view. Verdicts are recomputed from the session every time; nothing is
//! cached across a session change.

use tokio::sync::watch;

use crate::session::{Role, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Permit,
    Deny { redirect: String },
}

impl Verdict {
    pub fn is_permit(&self) -> bool {
        matches!(self, Verdict::Permit)
    }
}

/// Permit iff the session carries an identity holding exactly `required_role`.
pub fn check_access(session: &Session, required_role: Role, login_route: &str) -> Verdict {
    match session.identity() {
        Some(identity) if identity.role == required_role => Verdict::Permit,
        _ => Verdict::Deny {
            redirect: login_route.to_string(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    required_role: Role,
    login_route: String,
}

impl RouteGuard {
    pub fn new(required_role: Role, login_route: impl Into<String>) -> Self {
        Self {
            required_role,
            login_route: login_route.into(),
        }
    }

    pub fn required_role(&self) -> Role {
        self.required_role
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn check(&self, session: &Session) -> Verdict {
        check_access(session, self.required_role, &self.login_route)
    }

    /// Wait for the next session change and evaluate it.
    ///
    /// Returns `None` once the session store is gone.
    pub async fn next_verdict(&self, sessions: &mut watch::Receiver<Session>) -> Option<Verdict> {
        sessions.changed().await.ok()?;
        let session = sessions.borrow_and_update();
        Some(self.check(&session))
    }
}
