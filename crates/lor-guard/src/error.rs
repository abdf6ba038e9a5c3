//! Guard error types.

use lor_model::Role;
use lor_session::SessionError;
use thiserror::Error;

/// Errors surfaced by a login form.
#[derive(Debug, Error)]
pub enum PortalError {
    /// The login itself failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The credentials were valid but belong to another role.
    ///
    /// The session has already been cleared when this is returned.
    #[error(
        "Access denied. This is the {} Portal. You are logged in as {actual}. Please use the correct portal for your role.",
        .portal.title()
    )]
    WrongPortal {
        /// Role the portal is meant for.
        portal: Role,
        /// Raw role of the account that signed in.
        actual: String,
    },
}

impl PortalError {
    /// Checks if this is a role mismatch.
    #[must_use]
    pub const fn is_wrong_portal(&self) -> bool {
        matches!(self, Self::WrongPortal { .. })
    }
}

/// Result type for portal operations.
pub type PortalResult<T> = Result<T, PortalError>;
