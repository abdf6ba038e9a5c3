//! Calls made on behalf of the signed-in user.

use std::sync::Arc;

use lor_model::{
    CreateLorRequest, DashboardStats, DeleteOutcome, GeneratedPdf, LorRequest, ProfessorList,
    RequestList, ReviewComments, User, UserId, UserList,
};
use lor_session::{ClearReason, SessionManager};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cache::ResponseCache;
use crate::error::{ClientError, ClientResult};
use crate::transport::{check, HttpTransport};

/// Envelope of `PUT /admin/users/{id}/toggle-status`.
#[derive(Debug, Deserialize)]
struct ToggledUser {
    user: User,
}

/// Authenticated API client.
///
/// The bearer token is read from the session on every call, so a login or
/// logout elsewhere is picked up without rebuilding the client.
#[derive(Clone)]
pub struct LorApi {
    transport: HttpTransport,
    session: Arc<SessionManager>,
    cache: ResponseCache,
}

impl LorApi {
    /// Creates a client bound to a session.
    #[must_use]
    pub fn new(transport: HttpTransport, session: Arc<SessionManager>) -> Self {
        let cache = ResponseCache::new(session.store().storage().clone());
        Self {
            transport,
            session,
            cache,
        }
    }

    /// Gets the session this client acts for.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Gets the response cache.
    #[must_use]
    pub const fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    fn authorized(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let token = self.session.token().ok_or(ClientError::NotAuthenticated)?;
        Ok(self.transport.request(method, path).bearer_auth(token))
    }

    async fn execute(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let response = builder.send().await?;
        match check(response).await {
            Err(ClientError::Unauthorized) => {
                tracing::warn!("Server rejected the bearer token, ending session");
                self.session.force_logout(ClearReason::Unauthorized);
                Err(ClientError::Unauthorized)
            }
            other => other,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let builder = self.authorized(Method::GET, path)?;
        Ok(self.execute(builder).await?.json().await?)
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut builder = self.authorized(method, path)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(self.execute(builder).await?.json().await?)
    }

    // === Student ===

    /// Submits a new request.
    ///
    /// # Errors
    ///
    /// Returns the server's reason when the request is refused.
    pub async fn create_request(&self, request: &CreateLorRequest) -> ClientResult<LorRequest> {
        tracing::debug!(professor_id = request.professor_id, "Creating LOR request");
        self.send(Method::POST, "/lor-requests", Some(request)).await
    }

    /// Lists the signed-in student's requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn student_requests(&self) -> ClientResult<RequestList> {
        self.get("/lor-requests/student").await
    }

    /// Lists the signed-in student's approved requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn approved_requests(&self) -> ClientResult<RequestList> {
        self.get("/lor-requests/student/approved").await
    }

    /// Deletes one of the student's requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn delete_request(&self, id: i64) -> ClientResult<DeleteOutcome> {
        self.send::<(), _>(Method::DELETE, &format!("/lor-requests/{id}"), None)
            .await
    }

    /// Lists active professors a request can be sent to.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn professors(&self) -> ClientResult<ProfessorList> {
        self.get("/lor-requests/professors").await
    }

    // === Professor ===

    /// Lists requests addressed to the signed-in professor.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn professor_requests(&self) -> ClientResult<RequestList> {
        self.get("/lor-requests/professor").await
    }

    /// Lists the professor's requests still waiting for review.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn pending_requests(&self) -> ClientResult<RequestList> {
        self.get("/lor-requests/professor/pending").await
    }

    /// Approves a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn approve_request(&self, id: i64, comments: &str) -> ClientResult<LorRequest> {
        self.review(id, "approve", comments).await
    }

    /// Rejects a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn reject_request(&self, id: i64, comments: &str) -> ClientResult<LorRequest> {
        self.review(id, "reject", comments).await
    }

    async fn review(&self, id: i64, action: &str, comments: &str) -> ClientResult<LorRequest> {
        let body = ReviewComments {
            comments: comments.to_string(),
        };
        self.send(
            Method::PUT,
            &format!("/lor-requests/{id}/{action}"),
            Some(&body),
        )
        .await
    }

    // === PDF ===

    /// Generates the letter for an approved request.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn generate_pdf(&self, request_id: i64) -> ClientResult<GeneratedPdf> {
        self.send::<(), _>(Method::POST, &format!("/pdf/generate/{request_id}"), None)
            .await
    }

    /// Downloads a generated letter.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn download_pdf(&self, reference: &str) -> ClientResult<Vec<u8>> {
        let path = format!("/pdf/download/{}", urlencoding::encode(reference));
        let builder = self.authorized(Method::GET, &path)?;
        let bytes = self.execute(builder).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    // === Admin ===

    /// Fetches dashboard counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn dashboard_stats(&self) -> ClientResult<DashboardStats> {
        self.get("/admin/dashboard").await
    }

    /// Lists all accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn users(&self) -> ClientResult<UserList> {
        self.get("/admin/users").await
    }

    /// Flips an account's active flag and returns the updated account.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn toggle_user_status(&self, id: UserId) -> ClientResult<User> {
        let toggled: ToggledUser = self
            .send::<(), _>(
                Method::PUT,
                &format!("/admin/users/{id}/toggle-status"),
                None,
            )
            .await?;
        Ok(toggled.user)
    }
}
