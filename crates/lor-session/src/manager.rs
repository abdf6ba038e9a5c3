//! Session manager.
//!
//! The [`SessionManager`] is the only writer of session state. Guards,
//! views and the HTTP client read published [`AuthSnapshot`]s and call
//! back into the manager to change anything.

use std::sync::Arc;

use async_trait::async_trait;
use lor_model::User;
use serde::Serialize;
use tokio::sync::{broadcast, watch};

use crate::credential::CredentialStore;
use crate::error::SessionResult;
use crate::state::{AuthSnapshot, ClearReason, Phase, Session, SessionEvent};
use crate::token;

/// Capacity of the session event channel.
const EVENT_CAPACITY: usize = 16;

/// Username and password sent to the login endpoint.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Login name (the account email).
    pub username: String,
    /// Password.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// The remote authority that exchanges credentials for a bearer token.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a bearer token.
    ///
    /// Implementations report rejected credentials and transport failures
    /// as [`SessionError::Auth`](crate::SessionError::Auth).
    async fn login(&self, credentials: &Credentials) -> SessionResult<String>;
}

/// Owner of the process-wide session.
pub struct SessionManager {
    api: Arc<dyn AuthApi>,
    store: CredentialStore,
    state: watch::Sender<AuthSnapshot>,
    events: broadcast::Sender<SessionEvent>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a manager in the loading phase.
    ///
    /// Call [`hydrate`](Self::hydrate) once at startup to leave it.
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, store: CredentialStore) -> Self {
        let (state, _) = watch::channel(AuthSnapshot::default());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            api,
            store,
            state,
            events,
        }
    }

    /// Restores the persisted session, if any, and ends the loading phase.
    ///
    /// Returns whether a session was restored. Only the first call reads
    /// storage; later calls report the current state.
    pub fn hydrate(&self) -> bool {
        if self.state.borrow().phase == Phase::Ready {
            return self.is_authenticated();
        }

        let restored = self.store.load().map(|(token, user)| Session::new(token, user));
        let user = restored.as_ref().map(|s| s.user().clone());

        self.state.send_modify(|snapshot| {
            snapshot.phase = Phase::Ready;
            snapshot.session = restored;
        });

        match user {
            Some(user) => {
                tracing::debug!(user_id = user.id, role = %user.role, "Session restored");
                let _ = self.events.send(SessionEvent::Established(user));
                true
            }
            None => {
                tracing::debug!("No persisted session");
                false
            }
        }
    }

    /// Signs in with a username and password.
    ///
    /// On success the token and the user decoded from it are persisted and
    /// then published. On failure the session is left as it was.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Auth`](crate::SessionError::Auth) if the remote API
    ///   rejects the credentials or cannot be reached
    /// - [`SessionError::MalformedToken`](crate::SessionError::MalformedToken)
    ///   if the issued token has no readable claims
    /// - [`SessionError::Storage`](crate::SessionError::Storage) if the
    ///   session cannot be persisted
    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> SessionResult<User> {
        let credentials = Credentials::new(username, password);

        self.state.send_modify(|s| s.login_pending = true);
        let result = self.establish(&credentials).await;
        self.state.send_modify(|s| s.login_pending = false);

        match &result {
            Ok(user) => {
                tracing::info!(user_id = user.id, role = %user.role, "Login succeeded");
            }
            Err(e) => {
                tracing::info!(username = %credentials.username, "Login failed: {}", e);
            }
        }
        result
    }

    async fn establish(&self, credentials: &Credentials) -> SessionResult<User> {
        let token = self.api.login(credentials).await?;
        let user = token::decode(&token)?.into_user();

        self.store.save(&token, &user)?;
        self.state.send_modify(|s| {
            s.session = Some(Session::new(token, user.clone()));
        });
        let _ = self.events.send(SessionEvent::Established(user.clone()));

        Ok(user)
    }

    /// Signs out.
    ///
    /// Safe to call without a session: storage is cleared again and the
    /// published state stays unauthenticated.
    pub fn logout(&self) {
        self.clear(ClearReason::Logout);
    }

    /// Signs out because something other than the user demanded it.
    pub fn force_logout(&self, reason: ClearReason) {
        tracing::warn!(%reason, "Forcing logout");
        self.clear(reason);
    }

    fn clear(&self, reason: ClearReason) {
        self.store.clear();
        self.state.send_if_modified(|s| {
            let modified = s.session.is_some();
            s.session = None;
            modified
        });
        if reason == ClearReason::Logout {
            tracing::info!("Logged out");
        }
        let _ = self.events.send(SessionEvent::Cleared(reason));
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.borrow().clone()
    }

    /// Subscribes to snapshot changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.subscribe()
    }

    /// Subscribes to session events.
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Checks if a token and a user are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Checks if hydration is still pending.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Returns the signed-in user.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    /// Returns the current bearer token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_string)
    }

    /// Returns the credential store.
    #[must_use]
    pub const fn store(&self) -> &CredentialStore {
        &self.store
    }
}
