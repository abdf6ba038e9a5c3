//! Command implementations.

pub mod admin;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod navigate;
pub mod pdf;
pub mod register;
pub mod request;

pub use admin::run_admin;
pub use auth::{run_login, run_logout, run_whoami};
pub use config::run_config;
pub use dashboard::run_dashboard;
pub use navigate::run_open;
pub use pdf::run_pdf;
pub use register::run_register;
pub use request::run_request;

use std::sync::Arc;

use lor_client::{AuthEndpoint, HttpTransport, LorApi};
use lor_guard::Navigator;
use lor_model::{Role, User};
use lor_session::{ClientStorage, CredentialStore, FileStorage, SessionManager};

use crate::config::OutputFormat;
use crate::{CliConfig, CliError, CliResult};

/// Everything a command needs: the restored session, the API client and
/// the navigator sharing that session.
pub struct App {
    config: CliConfig,
    format: OutputFormat,
    auth: AuthEndpoint,
    api: LorApi,
    navigator: Navigator,
}

impl App {
    /// Builds the client stack and restores the persisted session.
    pub fn new(
        config: CliConfig,
        server_override: Option<&str>,
        format_override: Option<OutputFormat>,
    ) -> CliResult<Self> {
        let storage_dir = config.effective_storage_dir()?;
        let transport = HttpTransport::new(&config.client_config(server_override))?;
        tracing::debug!(
            server = transport.base_url(),
            storage = %storage_dir.display(),
            "Client configured"
        );
        let storage: Arc<dyn ClientStorage> = Arc::new(FileStorage::new(storage_dir));
        Ok(Self::with_parts(config, format_override, transport, storage))
    }

    /// Builds the client stack over an explicit transport and storage.
    #[must_use]
    pub fn with_parts(
        config: CliConfig,
        format_override: Option<OutputFormat>,
        transport: HttpTransport,
        storage: Arc<dyn ClientStorage>,
    ) -> Self {
        let auth = AuthEndpoint::new(transport.clone());
        let manager = Arc::new(SessionManager::new(
            Arc::new(auth.clone()),
            CredentialStore::new(storage),
        ));
        manager.hydrate();

        let api = LorApi::new(transport, Arc::clone(&manager));
        let navigator = Navigator::new(manager);
        let format = format_override.unwrap_or(config.output_format);

        Self {
            config,
            format,
            auth,
            api,
            navigator,
        }
    }

    /// Effective output format.
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &CliConfig {
        &self.config
    }

    /// Session shared by every component.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionManager> {
        self.navigator.manager()
    }

    /// Authenticated API client.
    #[must_use]
    pub const fn api(&self) -> &LorApi {
        &self.api
    }

    /// Unauthenticated endpoints.
    #[must_use]
    pub const fn auth(&self) -> &AuthEndpoint {
        &self.auth
    }

    /// Navigator bound to the session.
    pub fn navigator(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    /// Returns the signed-in user.
    pub fn require_user(&self) -> CliResult<User> {
        self.session().current_user().ok_or(CliError::NotSignedIn)
    }

    /// Returns the signed-in user if they hold `role`.
    pub fn require_role(&self, role: Role) -> CliResult<User> {
        let user = self.require_user()?;
        if user.has_role(role) {
            Ok(user)
        } else {
            Err(CliError::WrongRole(role.title().to_lowercase()))
        }
    }
}
