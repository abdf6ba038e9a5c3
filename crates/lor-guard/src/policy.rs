//! Access policy.
//!
//! [`decide`] is a pure function of the session state and the navigation
//! attempt. Rules, in priority order:
//!
//! 1. While hydration is pending, wait.
//! 2. Signed out: routes that need a session redirect to `/login`;
//!    public routes are allowed.
//! 3. Signed in: public-only routes (landing, any sign-in form,
//!    registration) redirect to `/dashboard`; routes restricted to other
//!    roles redirect to `/dashboard`; everything else is allowed.
//!
//! Denials are redirects, never errors.

use lor_model::Role;
use lor_session::AuthSnapshot;

use crate::route::{Route, RouteIntent};

/// What the guard knows about the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Persisted state has not been read yet.
    Loading,
    /// No session.
    Unauthenticated,
    /// A session exists. `None` means its role is outside the known set;
    /// the dashboard dispatcher ends such sessions.
    Authenticated(Option<Role>),
}

impl GuardState {
    /// Derives the guard state from a published snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &AuthSnapshot) -> Self {
        if snapshot.is_loading() {
            return Self::Loading;
        }
        match &snapshot.session {
            None => Self::Unauthenticated,
            Some(session) => Self::Authenticated(session.role().ok()),
        }
    }
}

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Show a neutral waiting indicator and decide later.
    Wait,
    /// Show the requested route.
    Allow,
    /// Go somewhere else instead.
    Redirect(Route),
}

/// Decides whether a navigation attempt may proceed.
#[must_use]
pub fn decide(state: &GuardState, intent: &RouteIntent) -> Decision {
    let route = intent.route;

    let decision = match state {
        GuardState::Loading => Decision::Wait,
        GuardState::Unauthenticated if route.requires_auth() => Decision::Redirect(Route::SignIn),
        GuardState::Unauthenticated => Decision::Allow,
        GuardState::Authenticated(_) if route.is_public_only() => {
            Decision::Redirect(Route::Dashboard)
        }
        GuardState::Authenticated(role) => match route.required_roles() {
            Some(allowed) if !role.is_some_and(|r| allowed.contains(&r)) => {
                Decision::Redirect(Route::Dashboard)
            }
            _ => Decision::Allow,
        },
    };

    tracing::debug!(
        ?state,
        route = %route,
        declared_role = ?intent.declared_role,
        ?decision,
        "Route decision"
    );
    decision
}
