//! Published session state.

use lor_model::{InvalidRole, Role, User};
use serde::{Deserialize, Serialize};

/// An established session.
///
/// The token and the user are only ever set and cleared together; there is
/// no way to build a `Session` with one and not the other.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user: User,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// User derived from the token.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Parses the user's role.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRole`] when the role is outside the known set.
    pub fn role(&self) -> Result<Role, InvalidRole> {
        self.user.parsed_role()
    }
}

/// Whether startup hydration has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Persisted state has not been read yet.
    #[default]
    Loading,
    /// Hydration has run; the session field is authoritative.
    Ready,
}

/// A point-in-time view of the session, as published to readers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    /// Hydration phase.
    pub phase: Phase,
    /// Current session, if any.
    pub session: Option<Session>,
    /// Whether a login call is in flight.
    pub login_pending: bool,
}

impl AuthSnapshot {
    /// Checks if a token and a user are present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Checks if hydration is still pending.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Current user, if authenticated.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(Session::user)
    }

    /// Current bearer token, if authenticated.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(Session::token)
    }
}

/// Why a session was cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClearReason {
    /// The user logged out.
    Logout,
    /// The remote API answered 401.
    Unauthorized,
    /// The session carried a role outside the known set.
    InvalidRole,
    /// The user signed in through a portal meant for another role.
    WrongPortal,
}

impl std::fmt::Display for ClearReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Logout => "logout",
            Self::Unauthorized => "unauthorized",
            Self::InvalidRole => "invalid role",
            Self::WrongPortal => "wrong portal",
        })
    }
}

/// Session change notifications, emitted after the snapshot is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new session was established by login or hydration.
    Established(User),
    /// The session was cleared.
    Cleared(ClearReason),
}
