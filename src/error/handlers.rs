//! Error handlers
//!
//! Provides error reporting and the messages shown to the user.

use log::{error, warn};

use crate::error::types::{AuthError, PortalError};

/// Log a portal error at a level matching its severity.
pub fn handle_error(err: &PortalError) {
    match err {
        PortalError::Auth(AuthError::InvalidCredentials(_)) | PortalError::Report(_) => {
            warn!("{}", err)
        }
        _ => error!("Portal error: {}", err),
    }
}

/// Inline message for the login view.
///
/// Keeps "wrong password" and "cannot reach server" apart so the user knows
/// whether retrying makes sense.
pub fn login_failure_message(err: &AuthError) -> String {
    match err {
        AuthError::InvalidCredentials(msg) => msg.clone(),
        AuthError::Transport(_) => {
            "Cannot reach the server. Check your connection and try again.".to_string()
        }
        AuthError::LoginInProgress => "Already logging in, please wait.".to_string(),
    }
}

/// Process exit code for a failed command.
pub fn exit_code(err: &PortalError) -> i32 {
    match err {
        PortalError::Auth(AuthError::InvalidCredentials(_)) => 1,
        PortalError::Auth(_) => 2,
        PortalError::Report(_) => 3,
        PortalError::Classify(_) => 4,
        PortalError::Storage(_) | PortalError::Io(_) => 5,
        PortalError::Config(_) => 78,
    }
}
