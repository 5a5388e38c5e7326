//! Authentication system
//!
//! Handles credential validation in local and remote mode and owns every
//! write to the session store.

pub mod authenticator;
pub mod credentials;
pub mod mode;
pub mod remote;
pub mod validator;

pub use authenticator::{AuthOptions, Authenticator};
pub use credentials::{Credential, LOCAL_SESSION_TOKEN};
pub use mode::AuthMode;
pub use remote::RemoteAuthClient;
