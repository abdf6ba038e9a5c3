//! Login and registration endpoints.

use async_trait::async_trait;
use lor_model::{ProfessorRegistration, StudentRegistration};
use lor_session::{AuthApi, Credentials, SessionError, SessionResult};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};
use crate::transport::{check, HttpTransport};

/// Body returned by the login and registration endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token.
    pub token: String,
}

/// Endpoints that work without a session.
#[derive(Debug, Clone)]
pub struct AuthEndpoint {
    transport: HttpTransport,
}

impl AuthEndpoint {
    /// Creates the endpoint over a transport.
    #[must_use]
    pub const fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<LoginResponse> {
        let response = self
            .transport
            .request(Method::POST, path)
            .json(body)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Exchanges credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the server rejects the credentials
    /// and [`ClientError::Http`] when it cannot be reached.
    pub async fn request_token(&self, credentials: &Credentials) -> ClientResult<String> {
        Ok(self.post("/auth/login", credentials).await?.token)
    }

    /// Registers a student account.
    ///
    /// The returned token is not used; callers sign in afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with the server's reason when the
    /// registration is refused.
    pub async fn register_student(
        &self,
        registration: &StudentRegistration,
    ) -> ClientResult<LoginResponse> {
        tracing::debug!(email = %registration.email, "Registering student");
        self.post("/auth/register/student", registration).await
    }

    /// Registers a professor account.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with the server's reason when the
    /// registration is refused.
    pub async fn register_professor(
        &self,
        registration: &ProfessorRegistration,
    ) -> ClientResult<LoginResponse> {
        tracing::debug!(email = %registration.email, "Registering professor");
        self.post("/auth/register/professor", registration).await
    }
}

#[async_trait]
impl AuthApi for AuthEndpoint {
    async fn login(&self, credentials: &Credentials) -> SessionResult<String> {
        self.request_token(credentials)
            .await
            .map_err(|e| SessionError::Auth(login_failure(&e)))
    }
}

/// Message shown on the login form for a failed call.
fn login_failure(err: &ClientError) -> String {
    match err {
        ClientError::Api { message, .. } => message.clone(),
        ClientError::Unauthorized => "Invalid username or password".to_string(),
        ClientError::Http(e) if e.is_connect() || e.is_timeout() => {
            format!("Login failed: server unreachable ({e})")
        }
        _ => "Login failed. Please try again.".to_string(),
    }
}
