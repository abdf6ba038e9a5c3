//! Sign-in forms.
//!
//! The generic form accepts any role. The three role-specific forms check
//! the role of the new session after login succeeds; a mismatch signs the
//! user straight back out and reports which role they actually hold,
//! instead of silently redirecting.

use lor_model::{Role, User};
use lor_session::{ClearReason, SessionManager};

use crate::error::{PortalError, PortalResult};
use crate::route::RouteIntent;

/// Submits a sign-in form.
///
/// The role declared by `form` selects the check: role-specific forms only
/// accept their own role, any other route behaves like the generic form.
///
/// # Errors
///
/// - [`PortalError::Session`] if the login itself fails
/// - [`PortalError::WrongPortal`] if the account belongs to another role;
///   the session is already cleared
pub async fn login_at(
    manager: &SessionManager,
    form: impl Into<RouteIntent>,
    username: impl Into<String>,
    password: impl Into<String>,
) -> PortalResult<User> {
    let declared = form.into().declared_role;
    let user = manager.login(username, password).await?;

    if let Some(expected) = declared {
        check_role(manager, expected, &user)?;
    }
    Ok(user)
}

fn check_role(manager: &SessionManager, expected: Role, user: &User) -> PortalResult<()> {
    if user.has_role(expected) {
        return Ok(());
    }

    tracing::info!(
        portal = %expected,
        actual = %user.role,
        "Signed in through the wrong portal"
    );
    manager.force_logout(ClearReason::WrongPortal);
    Err(PortalError::WrongPortal {
        portal: expected,
        actual: user.role.clone(),
    })
}
