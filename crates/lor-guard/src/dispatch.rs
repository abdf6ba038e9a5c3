//! Dashboard dispatch.

use lor_model::Role;
use lor_session::{ClearReason, SessionManager};
use serde::{Deserialize, Serialize};

use crate::route::Route;

/// The dashboard shown for each role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardView {
    /// Own requests and request creation.
    Student,
    /// Received requests and review actions.
    Professor,
    /// Statistics and account management.
    Admin,
}

impl From<Role> for DashboardView {
    fn from(role: Role) -> Self {
        match role {
            Role::Student => Self::Student,
            Role::Professor => Self::Professor,
            Role::Admin => Self::Admin,
        }
    }
}

/// Result of dispatching the dashboard route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Render this view.
    View(DashboardView),
    /// Go here instead.
    Redirect(Route),
}

/// Picks the dashboard for the current session.
///
/// The role is re-checked on every call. A session whose role is outside
/// the known set is ended and the user is sent to the landing page.
pub fn dispatch(manager: &SessionManager) -> Dispatch {
    let Some(user) = manager.current_user() else {
        return Dispatch::Redirect(Route::SignIn);
    };

    match user.parsed_role() {
        Ok(role) => Dispatch::View(role.into()),
        Err(e) => {
            tracing::warn!(user_id = user.id, "Ending session: {}", e);
            manager.force_logout(ClearReason::InvalidRole);
            Dispatch::Redirect(Route::Landing)
        }
    }
}
