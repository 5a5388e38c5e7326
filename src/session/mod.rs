//! Session management
//!
//! Holds the authenticated identity and token, persisted across restarts.

pub mod model;
pub mod store;

pub use model::{Identity, Role, Session, SessionState};
pub use store::{SessionStore, TOKEN_KEY, USER_KEY};
