//! Common test utilities and fixtures.
//!
//! [`TestEnv`] serves a fake of the remote API on an ephemeral port. It
//! keeps accounts and requests in memory, issues HS256 tokens, and checks
//! them on every protected route.

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Path as UrlPath, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::oneshot;

use lor_client::{AuthEndpoint, ClientConfig, HttpTransport, LorApi};
use lor_session::{CredentialStore, FileStorage, SessionManager};

const SECRET: &[u8] = b"integration-test-secret";

/// Seeded student.
pub const STUDENT: (&str, &str) = ("ada@uni.edu", "student-pass");
/// Seeded professor.
pub const PROFESSOR: (&str, &str) = ("lee@uni.edu", "professor-pass");
/// Seeded admin.
pub const ADMIN: (&str, &str) = ("root@uni.edu", "admin-pass");

/// Bytes served for every generated letter.
pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n% fake letter\n";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenClaims {
    id: i64,
    name: String,
    sub: String,
    role: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Clone)]
struct Account {
    id: i64,
    name: String,
    email: String,
    password: String,
    role: String,
    active: bool,
    department: Option<String>,
}

impl Account {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "email": self.email,
            "role": self.role,
            "isActive": self.active,
            "department": self.department,
        })
    }
}

/// In-memory backend state.
#[derive(Debug, Default)]
pub struct FakeState {
    accounts: Vec<Account>,
    requests: Vec<Value>,
    next_id: i64,
    revoked: bool,
}

impl FakeState {
    fn seeded() -> Self {
        let mut state = Self {
            next_id: 1,
            ..Self::default()
        };
        state.add_account("Ada", STUDENT.0, STUDENT.1, "STUDENT", None);
        state.add_account("Dr. Lee", PROFESSOR.0, PROFESSOR.1, "PROFESSOR", Some("CS"));
        state.add_account("Root", ADMIN.0, ADMIN.1, "ADMIN", None);
        state
    }

    fn add_account(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
        department: Option<&str>,
    ) -> Account {
        let account = Account {
            id: self.next_id,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: role.to_string(),
            active: true,
            department: department.map(str::to_string),
        };
        self.next_id += 1;
        self.accounts.push(account.clone());
        account
    }

    /// Number of stored requests.
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }
}

type Shared = Arc<Mutex<FakeState>>;

/// Test environment running the fake API.
pub struct TestEnv {
    /// API base URL, ending in `/api`.
    pub base_url: String,
    /// Backend state, for assertions and fault injection.
    pub state: Shared,
    /// Server shutdown signal.
    _shutdown_tx: oneshot::Sender<()>,
}

/// The client stack as the CLI wires it.
pub struct TestClient {
    /// Persisted client state.
    pub storage: Arc<FileStorage>,
    /// Session.
    pub session: Arc<SessionManager>,
    /// Authenticated calls.
    pub api: LorApi,
    /// Login and registration.
    pub auth: AuthEndpoint,
}

impl TestEnv {
    /// Starts the fake API.
    pub async fn new() -> anyhow::Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("lor_session=debug,lor_guard=debug,lor_client=debug")
            .with_test_writer()
            .try_init();

        let state: Shared = Arc::new(Mutex::new(FakeState::seeded()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (_shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let app = router(Arc::clone(&state));
        tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                tracing::error!("Fake API error: {}", e);
            }
        });

        Ok(Self {
            base_url: format!("http://{addr}/api"),
            state,
            _shutdown_tx,
        })
    }

    /// Makes every protected route answer `401` from now on.
    pub fn revoke_tokens(&self) {
        self.state.lock().revoked = true;
    }

    /// Transport pointed at the fake API.
    pub fn transport(&self) -> anyhow::Result<HttpTransport> {
        Ok(HttpTransport::new(&ClientConfig::new(&self.base_url))?)
    }

    /// Builds a client whose state lives in `dir`, restoring any session
    /// a previous client left there.
    pub fn client(&self, dir: &Path) -> anyhow::Result<TestClient> {
        let transport = self.transport()?;
        let storage = Arc::new(FileStorage::new(dir));
        let auth = AuthEndpoint::new(transport.clone());
        let session = Arc::new(SessionManager::new(
            Arc::new(auth.clone()),
            CredentialStore::new(storage.clone()),
        ));
        session.hydrate();
        let api = LorApi::new(transport, Arc::clone(&session));

        Ok(TestClient {
            storage,
            session,
            api,
            auth,
        })
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register/student", post(register_student))
        .route("/api/auth/register/professor", post(register_professor))
        .route("/api/lor-requests", post(create_request))
        .route("/api/lor-requests/student", get(student_requests))
        .route("/api/lor-requests/student/approved", get(approved_requests))
        .route("/api/lor-requests/professor", get(professor_requests))
        .route("/api/lor-requests/professor/pending", get(pending_requests))
        .route("/api/lor-requests/professors", get(professors))
        .route("/api/lor-requests/:id", delete(delete_request))
        .route("/api/lor-requests/:id/approve", put(approve_request))
        .route("/api/lor-requests/:id/reject", put(reject_request))
        .route("/api/pdf/generate/:id", post(generate_pdf))
        .route("/api/pdf/download/:reference", get(download_pdf))
        .route("/api/admin/dashboard", get(admin_dashboard))
        .route("/api/admin/users", get(admin_users))
        .route("/api/admin/users/:id/toggle-status", put(toggle_status))
        .with_state(state)
}

type ApiResult = Result<Json<Value>, Response>;

fn failure(status: StatusCode, error: &str, message: &str) -> Response {
    (status, Json(json!({ "error": error, "message": message }))).into_response()
}

fn mint(account: &Account) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = TokenClaims {
        id: account.id,
        name: account.name.clone(),
        sub: account.email.clone(),
        role: account.role.clone(),
        iat: now,
        exp: now + 3600,
    };
    jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET))
        .unwrap_or_default()
}

/// Mints a validly signed token with an arbitrary role.
pub fn token_with_role(role: &str) -> String {
    mint(&Account {
        id: 99,
        name: "Mallory".to_string(),
        email: "mallory@uni.edu".to_string(),
        password: String::new(),
        role: role.to_string(),
        active: true,
        department: None,
    })
}

fn authorize(state: &Shared, headers: &HeaderMap, role: &str) -> Result<TokenClaims, Response> {
    let unauthorized = || failure(StatusCode::UNAUTHORIZED, "Unauthorized", "Full authentication is required");

    if state.lock().revoked {
        return Err(unauthorized());
    }
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(unauthorized)?;
    let claims = jsonwebtoken::decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(SECRET),
        &Validation::default(),
    )
    .map_err(|_| unauthorized())?
    .claims;

    if !role.is_empty() && claims.role != role {
        return Err(failure(StatusCode::FORBIDDEN, "Forbidden", "Access denied"));
    }
    Ok(claims)
}

fn field(body: &Value, name: &str) -> String {
    body.get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> ApiResult {
    let username = field(&body, "username");
    let password = field(&body, "password");
    let state = state.lock();

    let account = state
        .accounts
        .iter()
        .find(|a| a.email == username && a.password == password)
        .ok_or_else(|| {
            failure(StatusCode::BAD_REQUEST, "Authentication failed", "Invalid email or password")
        })?;
    if !account.active {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "Authentication failed",
            "Account is deactivated",
        ));
    }

    Ok(Json(json!({
        "token": mint(account),
        "type": "Bearer",
        "email": account.email,
        "role": account.role,
    })))
}

fn register(state: &Shared, body: &Value, role: &str, department: Option<&str>) -> ApiResult {
    let email = field(body, "email");
    let mut state = state.lock();
    if state.accounts.iter().any(|a| a.email == email) {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "Registration failed",
            "Email is already in use!",
        ));
    }
    let account = state.add_account(
        &field(body, "name"),
        &email,
        &field(body, "password"),
        role,
        department,
    );
    Ok(Json(json!({ "token": mint(&account), "email": email, "role": role })))
}

async fn register_student(State(state): State<Shared>, Json(body): Json<Value>) -> ApiResult {
    register(&state, &body, "STUDENT", None)
}

async fn register_professor(State(state): State<Shared>, Json(body): Json<Value>) -> ApiResult {
    let department = field(&body, "department");
    register(&state, &body, "PROFESSOR", Some(department.as_str()))
}

fn list<F: Fn(&Value) -> bool>(state: &Shared, keep: F) -> Json<Value> {
    let requests: Vec<Value> = state.lock().requests.iter().filter(|r| keep(r)).cloned().collect();
    Json(json!({ "count": requests.len(), "requests": requests }))
}

async fn student_requests(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let claims = authorize(&state, &headers, "STUDENT")?;
    Ok(list(&state, |r| r["studentId"] == claims.id))
}

async fn approved_requests(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let claims = authorize(&state, &headers, "STUDENT")?;
    Ok(list(&state, |r| r["studentId"] == claims.id && r["status"] == "APPROVED"))
}

async fn professor_requests(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let claims = authorize(&state, &headers, "PROFESSOR")?;
    Ok(list(&state, |r| r["professorId"] == claims.id))
}

async fn pending_requests(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    let claims = authorize(&state, &headers, "PROFESSOR")?;
    Ok(list(&state, |r| r["professorId"] == claims.id && r["status"] == "PENDING"))
}

async fn professors(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    authorize(&state, &headers, "")?;
    let professors: Vec<Value> = state
        .lock()
        .accounts
        .iter()
        .filter(|a| a.role == "PROFESSOR" && a.active)
        .map(Account::to_json)
        .collect();
    Ok(Json(json!({ "count": professors.len(), "professors": professors })))
}

async fn create_request(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult {
    let claims = authorize(&state, &headers, "STUDENT")?;
    let mut state = state.lock();

    let professor_id = body["professorId"].as_i64().unwrap_or_default();
    let professor = state
        .accounts
        .iter()
        .find(|a| a.id == professor_id && a.role == "PROFESSOR")
        .cloned()
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "Bad Request", "Professor not found"))?;

    let id = state.next_id;
    state.next_id += 1;
    let request = json!({
        "id": id,
        "studentId": claims.id,
        "studentName": claims.name,
        "professorId": professor.id,
        "professorName": professor.name,
        "professorDepartment": professor.department,
        "semester": body["semester"],
        "session": body["session"],
        "classRollNumber": body["classRollNumber"],
        "instituteCompany": body["instituteCompany"],
        "status": "PENDING",
        "requestedAt": "2024-03-01T10:15:30",
        "hasPdf": false,
    });
    state.requests.push(request.clone());
    Ok(Json(request))
}

fn review(state: &Shared, headers: &HeaderMap, id: i64, status: &str, body: &Value) -> ApiResult {
    let claims = authorize(state, headers, "PROFESSOR")?;
    let mut state = state.lock();
    let request = state
        .requests
        .iter_mut()
        .find(|r| r["id"] == id && r["professorId"] == claims.id)
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "Bad Request", "Request not found"))?;

    request["status"] = json!(status);
    request["professorComments"] = body["comments"].clone();
    request["processedAt"] = json!("2024-03-02T09:00:00");
    Ok(Json(request.clone()))
}

async fn approve_request(
    State(state): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
    Json(body): Json<Value>,
) -> ApiResult {
    review(&state, &headers, id, "APPROVED", &body)
}

async fn reject_request(
    State(state): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
    Json(body): Json<Value>,
) -> ApiResult {
    review(&state, &headers, id, "REJECTED", &body)
}

async fn delete_request(
    State(state): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
) -> ApiResult {
    let claims = authorize(&state, &headers, "STUDENT")?;
    let mut state = state.lock();
    let before = state.requests.len();
    state
        .requests
        .retain(|r| !(r["id"] == id && r["studentId"] == claims.id));
    if state.requests.len() == before {
        return Err(failure(StatusCode::BAD_REQUEST, "Bad Request", "Request not found"));
    }
    Ok(Json(json!({ "success": true, "message": "LOR request deleted successfully" })))
}

async fn generate_pdf(
    State(state): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
) -> ApiResult {
    authorize(&state, &headers, "")?;
    let mut state = state.lock();
    let request = state
        .requests
        .iter_mut()
        .find(|r| r["id"] == id && r["status"] == "APPROVED")
        .ok_or_else(|| {
            failure(
                StatusCode::BAD_REQUEST,
                "Failed to generate PDF",
                "Request is not approved",
            )
        })?;

    let reference = format!("LOR-2024-{id:04}");
    request["hasPdf"] = json!(true);
    request["pdfReferenceNumber"] = json!(reference);
    request["pdfFileName"] = json!(format!("{reference}.pdf"));
    Ok(Json(json!({
        "success": true,
        "message": "PDF generated successfully",
        "referenceNumber": reference,
        "fileName": format!("{reference}.pdf"),
        "fileSize": PDF_BYTES.len(),
    })))
}

async fn download_pdf(
    State(state): State<Shared>,
    headers: HeaderMap,
    UrlPath(reference): UrlPath<String>,
) -> Response {
    if let Err(response) = authorize(&state, &headers, "") {
        return response;
    }
    let exists = state
        .lock()
        .requests
        .iter()
        .any(|r| r["pdfReferenceNumber"] == reference.as_str());
    if !exists {
        return StatusCode::NOT_FOUND.into_response();
    }
    ([(header::CONTENT_TYPE, "application/pdf")], PDF_BYTES).into_response()
}

async fn admin_dashboard(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    authorize(&state, &headers, "ADMIN")?;
    let state = state.lock();
    let count_role = |role: &str, active_only: bool| {
        state
            .accounts
            .iter()
            .filter(|a| a.role == role && (a.active || !active_only))
            .count()
    };
    let count_status =
        |status: &str| state.requests.iter().filter(|r| r["status"] == status).count();

    Ok(Json(json!({
        "users": {
            "totalAdmins": count_role("ADMIN", false),
            "totalProfessors": count_role("PROFESSOR", false),
            "totalStudents": count_role("STUDENT", false),
            "activeStudents": count_role("STUDENT", true),
            "activeProfessors": count_role("PROFESSOR", true),
        },
        "requests": {
            "totalRequests": state.requests.len(),
            "approvedRequests": count_status("APPROVED"),
            "pendingRequests": count_status("PENDING"),
            "rejectedRequests": count_status("REJECTED"),
        },
        "pdfs": { "totalPdfs": 0, "totalFileSize": 0 },
        "adminData": { "totalAdminProfessors": 0, "totalAdminStudents": 0 },
    })))
}

async fn admin_users(State(state): State<Shared>, headers: HeaderMap) -> ApiResult {
    authorize(&state, &headers, "ADMIN")?;
    let users: Vec<Value> = state.lock().accounts.iter().map(Account::to_json).collect();
    Ok(Json(json!({ "count": users.len(), "users": users })))
}

async fn toggle_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
) -> ApiResult {
    authorize(&state, &headers, "ADMIN")?;
    let mut state = state.lock();
    let account = state
        .accounts
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "Bad Request", "User not found"))?;
    account.active = !account.active;
    Ok(Json(json!({
        "success": true,
        "message": "User status updated successfully",
        "user": account.to_json(),
        "isActive": account.active,
    })))
}
