//! CLI error types.

use lor_client::ClientError;
use lor_guard::PortalError;
use lor_session::SessionError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// API call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Sign-in failed or the session could not be stored.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Sign-in through a role-specific portal was refused.
    #[error(transparent)]
    Portal(#[from] PortalError),

    /// The command needs a signed-in user.
    #[error("not signed in, run `lor login` first")]
    NotSignedIn,

    /// The command is not available to the signed-in role.
    #[error("this command is for {0} accounts")]
    WrongRole(String),

    /// Validation error.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Operation cancelled.
    #[error("operation cancelled")]
    Cancelled,
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
