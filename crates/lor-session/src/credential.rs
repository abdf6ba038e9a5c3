//! Credential store.
//!
//! Persists the bearer token and the user record under two keys that are
//! always written and cleared together.

use std::sync::Arc;

use lor_model::User;

use crate::error::{SessionError, SessionResult};
use crate::storage::ClientStorage;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key of the serialized user record.
pub const USER_KEY: &str = "user";

/// Saves and restores the token/user pair.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn ClientStorage>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

impl CredentialStore {
    /// Creates a credential store over the given storage.
    #[must_use]
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self { storage }
    }

    /// Returns the underlying storage.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn ClientStorage> {
        &self.storage
    }

    /// Persists the token and the user in a single write.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the user cannot be serialized or
    /// the storage rejects the write.
    pub fn save(&self, token: &str, user: &User) -> SessionResult<()> {
        let user_json =
            serde_json::to_string(user).map_err(|e| SessionError::Storage(e.to_string()))?;
        self.storage
            .set_many(&[(TOKEN_KEY, token), (USER_KEY, user_json.as_str())])
    }

    /// Loads the persisted token and user.
    ///
    /// Returns `None` when nothing is stored. Data that is only half present
    /// or whose user record does not parse is treated as absent and cleared.
    #[must_use]
    pub fn load(&self) -> Option<(String, User)> {
        let token = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let user_json = self.storage.get(USER_KEY);

        match (token, user_json) {
            (None, None) => None,
            (Some(token), Some(user_json)) => match serde_json::from_str::<User>(&user_json) {
                Ok(user) => Some((token, user)),
                Err(e) => {
                    tracing::warn!("Discarding persisted session with unreadable user record: {}", e);
                    self.discard();
                    None
                }
            },
            (token, _) => {
                tracing::warn!(
                    has_token = token.is_some(),
                    "Discarding incomplete persisted session"
                );
                self.discard();
                None
            }
        }
    }

    /// Removes all persisted client state.
    ///
    /// This wipes the whole storage, including cached responses, not just
    /// the two credential keys. Failures are logged; the call never fails.
    pub fn clear(&self) {
        if let Err(e) = self.storage.clear() {
            tracing::warn!("Failed to clear client storage: {}", e);
            // Fall back to at least dropping the credentials.
            if let Err(e) = self.storage.remove_many(&[TOKEN_KEY, USER_KEY]) {
                tracing::error!("Failed to remove persisted credentials: {}", e);
            }
        }
    }

    fn discard(&self) {
        if let Err(e) = self.storage.remove_many(&[TOKEN_KEY, USER_KEY]) {
            tracing::warn!("Failed to discard corrupt credentials: {}", e);
        }
    }
}
