pub mod auth;
pub mod commands;
pub mod config;
pub mod error;
pub mod guard;
pub mod report;
pub mod session;
pub mod storage;
pub mod utils;

pub use auth::{AuthMode, Authenticator, Credential};
pub use config::PortalConfig;
pub use guard::{RouteGuard, Verdict};
pub use session::{Identity, Role, Session, SessionStore};
