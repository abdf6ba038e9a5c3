//! Session error types.

use thiserror::Error;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The remote API rejected the credentials or could not be reached.
    #[error("{0}")]
    Auth(String),

    /// The bearer token has no decodable claims payload.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// Persisted client state could not be written.
    #[error("session storage error: {0}")]
    Storage(String),
}

impl SessionError {
    /// Checks if this error came from the remote API or the network.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
