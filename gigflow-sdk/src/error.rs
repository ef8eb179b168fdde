//! Error taxonomy for the SDK.
//!
//! Three kinds of failure reach consumers: local validation (the network is
//! never contacted), a non-success or malformed response from the backend,
//! and realtime transport trouble. None of them are fatal — every error
//! resolves to a recoverable state the consumer can re-trigger from.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Client-side form validation failed; no request was made.
    #[error("{0}")]
    Validation(String),

    /// The backend answered with a non-success status, or its response did
    /// not match the expected shape. `status` is 0 when the request never
    /// produced an HTTP status (connect failure, decode failure).
    #[error("server error ({status}): {message}")]
    Collaborator { status: u16, message: String },

    /// Realtime socket failure. Logged and recoverable; the rest of the
    /// client stays usable without live notifications.
    #[error("transport error: {0}")]
    Transport(String),

    /// An operation that needs a session was called while anonymous.
    #[error("not authenticated")]
    NotAuthenticated,
}

impl Error {
    /// Shorthand used by the slices when recording a failed dispatch.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Collaborator {
            status: e.status().map(|s| s.as_u16()).unwrap_or(0),
            message: e.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Transport(e.to_string())
    }
}
