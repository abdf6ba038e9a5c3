//! Authenticated API calls against the fake API.

use std::sync::Arc;

use lor_client::ClientError;
use lor_guard::{Navigator, Route, Screen};
use lor_model::{CreateLorRequest, RequestStatus, StudentRegistration};
use lor_session::{ClientStorage, SessionError};

use crate::common::{TestEnv, ADMIN, PDF_BYTES, PROFESSOR, STUDENT};

fn sample_request(professor_id: i64) -> CreateLorRequest {
    CreateLorRequest {
        professor_id,
        semester: "6".to_string(),
        session: "2023-24".to_string(),
        class_roll_number: "42".to_string(),
        institute_company: "ETH Zurich".to_string(),
    }
}

/// A request goes from creation through approval to a downloaded letter.
#[tokio::test]
async fn test_request_lifecycle() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let student_dir = tempfile::tempdir()?;
    let professor_dir = tempfile::tempdir()?;

    let student = env.client(student_dir.path())?;
    student.session.login(STUDENT.0, STUDENT.1).await?;

    let professors = student.api.professors().await?;
    assert_eq!(professors.count, 1);
    let lee = &professors.professors[0];
    assert_eq!(lee.department.as_deref(), Some("CS"));

    let created = student.api.create_request(&sample_request(lee.id)).await?;
    assert_eq!(created.status, RequestStatus::Pending);
    assert_eq!(created.professor_name, "Dr. Lee");
    assert_eq!(student.api.student_requests().await?.count, 1);
    assert_eq!(student.api.approved_requests().await?.count, 0);

    let professor = env.client(professor_dir.path())?;
    professor.session.login(PROFESSOR.0, PROFESSOR.1).await?;
    let pending = professor.api.pending_requests().await?;
    assert_eq!(pending.count, 1);
    assert_eq!(pending.requests[0].student_name, "Ada");

    let approved = professor
        .api
        .approve_request(created.id, "Excellent student")
        .await?;
    assert_eq!(approved.status, RequestStatus::Approved);
    assert_eq!(approved.professor_comments.as_deref(), Some("Excellent student"));
    assert_eq!(professor.api.pending_requests().await?.count, 0);
    assert_eq!(professor.api.professor_requests().await?.count, 1);

    let pdf = student.api.generate_pdf(created.id).await?;
    assert_eq!(pdf.file_size, PDF_BYTES.len() as u64);
    let bytes = student.api.download_pdf(&pdf.reference_number).await?;
    assert_eq!(bytes, PDF_BYTES);

    let approved = student.api.approved_requests().await?;
    assert!(approved.requests[0].has_pdf);
    Ok(())
}

/// Students can withdraw a request; professors can reject one.
#[tokio::test]
async fn test_delete_and_reject() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let student_dir = tempfile::tempdir()?;
    let professor_dir = tempfile::tempdir()?;

    let student = env.client(student_dir.path())?;
    student.session.login(STUDENT.0, STUDENT.1).await?;
    let first = student.api.create_request(&sample_request(2)).await?;
    let second = student.api.create_request(&sample_request(2)).await?;

    let outcome = student.api.delete_request(first.id).await?;
    assert!(outcome.success);
    assert_eq!(env.state.lock().request_count(), 1);

    let professor = env.client(professor_dir.path())?;
    professor.session.login(PROFESSOR.0, PROFESSOR.1).await?;
    let rejected = professor.api.reject_request(second.id, "Not eligible").await?;
    assert_eq!(rejected.status, RequestStatus::Rejected);
    Ok(())
}

/// A `401` ends the session everywhere: state, storage and navigation.
#[tokio::test]
async fn test_unauthorized_response_ends_session() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let dir = tempfile::tempdir()?;
    let client = env.client(dir.path())?;
    let mut navigator = Navigator::new(Arc::clone(&client.session));

    navigator.go(Route::StudentLogin);
    navigator.submit_login(STUDENT.0, STUDENT.1).await?;
    assert_eq!(navigator.current(), Route::Dashboard);

    env.revoke_tokens();
    let err = client.api.student_requests().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));

    assert!(!client.session.is_authenticated());
    assert!(client.storage.keys().is_empty());
    assert_eq!(navigator.refresh(), Screen::Page(Route::Landing));

    // Further calls are refused locally.
    assert!(matches!(
        client.api.student_requests().await,
        Err(ClientError::NotAuthenticated)
    ));
    Ok(())
}

/// Other error statuses surface the server message and keep the session.
#[tokio::test]
async fn test_forbidden_keeps_session() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let dir = tempfile::tempdir()?;
    let client = env.client(dir.path())?;
    client.session.login(STUDENT.0, STUDENT.1).await?;

    let err = client.api.pending_requests().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.user_message(), "Access denied");
    assert!(client.session.is_authenticated());
    Ok(())
}

/// Registration followed by login with the new account.
#[tokio::test]
async fn test_register_then_login() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let dir = tempfile::tempdir()?;
    let client = env.client(dir.path())?;

    let registration = StudentRegistration {
        name: "Grace".to_string(),
        email: "grace@uni.edu".to_string(),
        password: "grace-pass".to_string(),
        registration_number: "R-2".to_string(),
        examination_number: "E-2".to_string(),
        course: "B.Tech".to_string(),
    };
    let response = client.auth.register_student(&registration).await?;
    assert!(!response.token.is_empty());
    assert!(!client.session.is_authenticated());

    let user = client.session.login("grace@uni.edu", "grace-pass").await?;
    assert_eq!(user.role, "STUDENT");
    assert_eq!(user.name, "Grace");

    let err = client.auth.register_student(&registration).await.unwrap_err();
    assert_eq!(err.user_message(), "Email is already in use!");
    Ok(())
}

/// Admin statistics, account listing and deactivation.
#[tokio::test]
async fn test_admin_manages_accounts() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let admin_dir = tempfile::tempdir()?;
    let student_dir = tempfile::tempdir()?;

    let admin = env.client(admin_dir.path())?;
    admin.session.login(ADMIN.0, ADMIN.1).await?;

    let stats = admin.api.dashboard_stats().await?;
    assert_eq!(stats.users.total_students, 1);
    assert_eq!(stats.users.total_professors, 1);
    assert_eq!(stats.users.total_admins, 1);

    let users = admin.api.users().await?;
    assert_eq!(users.count, 3);
    let ada = users
        .users
        .iter()
        .find(|u| u.email == STUDENT.0)
        .map(|u| u.id)
        .unwrap();

    let toggled = admin.api.toggle_user_status(ada).await?;
    assert!(!toggled.is_active);
    assert_eq!(admin.api.dashboard_stats().await?.users.active_students, 0);

    let student = env.client(student_dir.path())?;
    let err = student.session.login(STUDENT.0, STUDENT.1).await.unwrap_err();
    assert!(matches!(err, SessionError::Auth(m) if m == "Account is deactivated"));
    Ok(())
}
