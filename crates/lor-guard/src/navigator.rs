//! Navigation.
//!
//! The [`Navigator`] tracks the current route, runs the access policy on
//! each navigation, follows redirects, and resets to the landing page
//! whenever the session is cleared so no signed-in view stays mounted.

use std::sync::Arc;

use lor_session::{SessionEvent, SessionManager};
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::dispatch::{dispatch, DashboardView, Dispatch};
use crate::error::PortalResult;
use crate::policy::{decide, Decision, GuardState};
use crate::portal::login_at;
use crate::route::{Route, RouteIntent};

/// Upper bound on redirects followed for one navigation.
const MAX_REDIRECTS: usize = 8;

/// What the client ends up showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Hydration is pending.
    Waiting,
    /// A public page.
    Page(Route),
    /// The role's dashboard.
    Dashboard(DashboardView),
    /// The admin management page.
    AdminPanel,
}

/// Applies the access policy to navigation requests.
pub struct Navigator {
    manager: Arc<SessionManager>,
    events: broadcast::Receiver<SessionEvent>,
    current: Route,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl Navigator {
    /// Creates a navigator positioned on the landing page.
    #[must_use]
    pub fn new(manager: Arc<SessionManager>) -> Self {
        let events = manager.events();
        Self {
            manager,
            events,
            current: Route::Landing,
        }
    }

    /// Current route.
    #[must_use]
    pub const fn current(&self) -> Route {
        self.current
    }

    /// Session manager this navigator reads from.
    #[must_use]
    pub fn manager(&self) -> &Arc<SessionManager> {
        &self.manager
    }

    /// Navigates to a path. Unknown paths lead to the landing page.
    pub fn navigate(&mut self, path: &str) -> Screen {
        self.go(Route::parse(path))
    }

    /// Navigates to a route.
    pub fn go(&mut self, route: Route) -> Screen {
        self.apply_events();
        let screen = self.resolve(route);
        self.apply_events();
        screen
    }

    /// Re-evaluates the current route against the latest session state.
    pub fn refresh(&mut self) -> Screen {
        self.apply_events();
        self.go(self.current)
    }

    /// Submits the sign-in form on the current route and, on success,
    /// moves to the dashboard.
    ///
    /// # Errors
    ///
    /// Returns the form's [`PortalError`](crate::PortalError). After a
    /// wrong-portal rejection the navigator has been reset with the session.
    pub async fn submit_login(
        &mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> PortalResult<Screen> {
        let form = self.current;
        match login_at(&self.manager, form, username, password).await {
            Ok(_) => Ok(self.go(Route::Dashboard)),
            Err(e) => {
                self.apply_events();
                Err(e)
            }
        }
    }

    fn resolve(&mut self, mut route: Route) -> Screen {
        for _ in 0..MAX_REDIRECTS {
            let state = GuardState::from_snapshot(&self.manager.snapshot());
            match decide(&state, &RouteIntent::new(route)) {
                Decision::Wait => {
                    self.current = route;
                    return Screen::Waiting;
                }
                Decision::Redirect(next) => route = next,
                Decision::Allow => match route {
                    Route::Dashboard => match dispatch(&self.manager) {
                        Dispatch::View(view) => {
                            self.current = route;
                            return Screen::Dashboard(view);
                        }
                        Dispatch::Redirect(next) => route = next,
                    },
                    Route::Admin => {
                        self.current = route;
                        return Screen::AdminPanel;
                    }
                    _ => {
                        self.current = route;
                        return Screen::Page(route);
                    }
                },
            }
        }

        tracing::warn!(last = %route, "Too many redirects, falling back to landing page");
        self.current = Route::Landing;
        Screen::Page(Route::Landing)
    }

    /// Applies pending session events: any clear resets to the landing page.
    fn apply_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(SessionEvent::Cleared(reason)) => {
                    tracing::debug!(%reason, "Session cleared, resetting navigation");
                    self.current = Route::Landing;
                }
                Ok(SessionEvent::Established(_)) | Err(TryRecvError::Lagged(_)) => {}
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }
}
