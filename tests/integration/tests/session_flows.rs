//! Sign-in, restore and sign-out against the fake API.

use std::sync::Arc;

use lor_guard::{dispatch, DashboardView, Dispatch, Navigator, PortalError, Route, Screen};
use lor_session::{ClientStorage, CredentialStore, FileStorage, SessionError};

use crate::common::{token_with_role, TestEnv, ADMIN, PROFESSOR, STUDENT};

/// A session created by one client is restored by the next one.
#[tokio::test]
async fn test_login_survives_restart() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let dir = tempfile::tempdir()?;

    let first = env.client(dir.path())?;
    let user = first.session.login(STUDENT.0, STUDENT.1).await?;
    assert_eq!(user.email, STUDENT.0);
    assert_eq!(user.role, "STUDENT");
    assert_eq!(user.name, "Ada");

    let second = env.client(dir.path())?;
    assert!(second.session.is_authenticated());
    assert_eq!(second.session.current_user(), Some(user));
    assert_eq!(second.session.token(), first.session.token());
    Ok(())
}

/// A rejected login shows the server's message and stores nothing.
#[tokio::test]
async fn test_wrong_password() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let dir = tempfile::tempdir()?;
    let client = env.client(dir.path())?;

    let err = client
        .session
        .login(STUDENT.0, "not-the-password")
        .await
        .unwrap_err();

    match err {
        SessionError::Auth(message) => assert_eq!(message, "Invalid email or password"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!client.session.is_authenticated());
    assert!(client.storage.keys().is_empty());
    Ok(())
}

/// Signing in at another role's portal is refused with the actual role
/// and leaves no session behind.
#[tokio::test]
async fn test_wrong_portal_is_rejected() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let dir = tempfile::tempdir()?;
    let client = env.client(dir.path())?;
    let mut navigator = Navigator::new(Arc::clone(&client.session));

    assert_eq!(
        navigator.go(Route::ProfessorLogin),
        Screen::Page(Route::ProfessorLogin)
    );
    let err = navigator
        .submit_login(STUDENT.0, STUDENT.1)
        .await
        .unwrap_err();

    assert!(matches!(err, PortalError::WrongPortal { .. }));
    assert_eq!(
        err.to_string(),
        "Access denied. This is the Professor Portal. You are logged in as STUDENT. \
         Please use the correct portal for your role."
    );
    assert!(!client.session.is_authenticated());
    assert!(client.storage.keys().is_empty());
    assert_eq!(navigator.current(), Route::Landing);
    Ok(())
}

/// The matching portal lands on the role's dashboard, and sign-in forms
/// are no longer reachable.
#[tokio::test]
async fn test_portal_login_reaches_dashboard() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let dir = tempfile::tempdir()?;
    let client = env.client(dir.path())?;
    let mut navigator = Navigator::new(Arc::clone(&client.session));

    navigator.go(Route::AdminLogin);
    let screen = navigator.submit_login(ADMIN.0, ADMIN.1).await?;
    assert_eq!(screen, Screen::Dashboard(DashboardView::Admin));

    assert_eq!(navigator.navigate("/admin"), Screen::AdminPanel);
    assert_eq!(
        navigator.navigate("/student-login"),
        Screen::Dashboard(DashboardView::Admin)
    );
    assert_eq!(navigator.navigate("/"), Screen::Dashboard(DashboardView::Admin));
    Ok(())
}

/// Professors are kept out of the admin page.
#[tokio::test]
async fn test_professor_cannot_open_admin_page() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let dir = tempfile::tempdir()?;
    let client = env.client(dir.path())?;
    client.session.login(PROFESSOR.0, PROFESSOR.1).await?;

    let mut navigator = Navigator::new(Arc::clone(&client.session));
    assert_eq!(
        navigator.navigate("/admin"),
        Screen::Dashboard(DashboardView::Professor)
    );
    Ok(())
}

/// Logout removes the persisted state.
#[tokio::test]
async fn test_logout_clears_persisted_state() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let dir = tempfile::tempdir()?;

    let client = env.client(dir.path())?;
    client.session.login(PROFESSOR.0, PROFESSOR.1).await?;
    assert!(client.storage.path().exists());

    client.session.logout();
    assert!(!client.session.is_authenticated());
    assert!(!client.storage.path().exists());

    let next = env.client(dir.path())?;
    assert!(!next.session.is_authenticated());
    Ok(())
}

/// A restored session whose role is outside the known set is ended by the
/// dashboard dispatcher.
#[tokio::test]
async fn test_unknown_role_is_signed_out() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let dir = tempfile::tempdir()?;

    let token = token_with_role("SUPERUSER");
    let user = lor_session::token::decode(&token)?.into_user();
    CredentialStore::new(Arc::new(FileStorage::new(dir.path()))).save(&token, &user)?;

    let client = env.client(dir.path())?;
    assert!(client.session.is_authenticated());
    assert_eq!(dispatch(&client.session), Dispatch::Redirect(Route::Landing));
    assert!(!client.session.is_authenticated());
    assert!(client.storage.keys().is_empty());
    Ok(())
}
