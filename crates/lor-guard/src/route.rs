//! Client-visible routes.

use lor_model::Role;
use serde::{Deserialize, Serialize};

/// A destination in the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    /// Public landing page (`/`).
    Landing,
    /// Generic sign-in form (`/login`).
    SignIn,
    /// Student sign-in form (`/student-login`).
    StudentLogin,
    /// Professor sign-in form (`/professor-login`).
    ProfessorLogin,
    /// Admin sign-in form (`/admin-login`).
    AdminLogin,
    /// Registration form (`/register`).
    Register,
    /// Role-dependent dashboard (`/dashboard`).
    Dashboard,
    /// Admin management page (`/admin`).
    Admin,
}

impl Route {
    /// All routes.
    pub const ALL: [Self; 8] = [
        Self::Landing,
        Self::SignIn,
        Self::StudentLogin,
        Self::ProfessorLogin,
        Self::AdminLogin,
        Self::Register,
        Self::Dashboard,
        Self::Admin,
    ];

    /// Returns the path of the route.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::SignIn => "/login",
            Self::StudentLogin => "/student-login",
            Self::ProfessorLogin => "/professor-login",
            Self::AdminLogin => "/admin-login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Admin => "/admin",
        }
    }

    /// Looks up a route by path.
    ///
    /// Query strings, fragments and a trailing slash are ignored. Returns
    /// `None` for unknown paths.
    #[must_use]
    pub fn resolve(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        let path = if path.is_empty() { "/" } else { path };

        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Looks up a route by path, falling back to the landing page.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self::resolve(path).unwrap_or(Self::Landing)
    }

    /// Checks if only signed-out users may see this route.
    #[must_use]
    pub const fn is_public_only(&self) -> bool {
        matches!(
            self,
            Self::Landing
                | Self::SignIn
                | Self::StudentLogin
                | Self::ProfessorLogin
                | Self::AdminLogin
                | Self::Register
        )
    }

    /// Checks if the route needs a session.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Admin)
    }

    /// Roles allowed on the route, if it restricts them.
    #[must_use]
    pub const fn required_roles(&self) -> Option<&'static [Role]> {
        match self {
            Self::Admin => Some(&[Role::Admin]),
            _ => None,
        }
    }

    /// Role a sign-in form is dedicated to.
    #[must_use]
    pub const fn portal_role(&self) -> Option<Role> {
        match self {
            Self::StudentLogin => Some(Role::Student),
            Self::ProfessorLogin => Some(Role::Professor),
            Self::AdminLogin => Some(Role::Admin),
            _ => None,
        }
    }

    /// Sign-in form dedicated to a role.
    #[must_use]
    pub const fn portal_for(role: Role) -> Self {
        match role {
            Role::Student => Self::StudentLogin,
            Role::Professor => Self::ProfessorLogin,
            Role::Admin => Self::AdminLogin,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// A navigation attempt: the destination plus the role it declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteIntent {
    /// Destination.
    pub route: Route,
    /// Role the destination is dedicated to, for role-specific sign-in forms.
    pub declared_role: Option<Role>,
}

impl RouteIntent {
    /// Creates an intent for a route.
    #[must_use]
    pub const fn new(route: Route) -> Self {
        Self {
            route,
            declared_role: route.portal_role(),
        }
    }

    /// Creates an intent from a path. Unknown paths go to the landing page.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Self::new(Route::parse(path))
    }
}

impl From<Route> for RouteIntent {
    fn from(route: Route) -> Self {
        Self::new(route)
    }
}
