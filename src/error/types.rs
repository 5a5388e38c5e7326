//! Error types
//!
//! Defines domain-specific error types for each module of the portal core.

use std::io;

use thiserror::Error;

use crate::report::PredictionReview;

/// Authentication module errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    /// Wrong identifier/secret, a role that does not match, or a rejected remote login.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The remote endpoint could not be reached or answered with an unexpected shape.
    #[error("Cannot reach authentication server: {0}")]
    Transport(String),

    #[error("A login attempt is already in progress")]
    LoginInProgress,
}

/// Key-value persistence errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Stored value for {0} is not valid UTF-8")]
    Encoding(String),

    #[error("Failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reasons a persisted session could not be restored.
///
/// Never returned to callers: hydration falls back to an anonymous session.
#[derive(Debug, Error)]
pub enum HydrationError {
    #[error("persisted token without a user")]
    MissingUser,

    #[error("persisted user without a token")]
    MissingToken,

    #[error("persisted token is empty")]
    EmptyToken,

    #[error("persisted user is not a valid identity: {0}")]
    CorruptUser(#[from] serde_json::Error),

    #[error("persisted state unreadable: {0}")]
    Storage(#[from] StorageError),
}

/// Classification endpoint errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("Cannot reach classification service: {0}")]
    Transport(String),

    #[error("Classification service reported an error: {0}")]
    Service(String),

    #[error("Malformed classification response: {0}")]
    MalformedResponse(String),
}

/// Issue report errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReportError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{0}")]
    NeedsReview(PredictionReview),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

/// General portal error that encompasses all error types
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Classification error: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
