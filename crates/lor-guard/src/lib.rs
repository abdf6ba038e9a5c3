//! # lor-guard
//!
//! Role-based navigation for the LOR client.
//!
//! ## Pieces
//!
//! - [`Route`] - the client-visible destinations
//! - [`decide`] - the pure access policy: allow, wait, or redirect
//! - [`portal`] - role-specific login with the post-login role check
//! - [`dispatch`] - maps the signed-in role to a dashboard view
//! - [`Navigator`] - applies decisions and follows redirects
//!
//! The guard only reads session state. Every change goes through the
//! [`SessionManager`](lor_session::SessionManager).
//!
//! ## Example
//!
//! ```ignore
//! use lor_guard::{decide, Decision, GuardState, Route, RouteIntent};
//!
//! let state = GuardState::from_snapshot(&manager.snapshot());
//! match decide(&state, &RouteIntent::from_path("/admin")) {
//!     Decision::Allow => render(),
//!     Decision::Redirect(to) => go(to),
//!     Decision::Wait => spinner(),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dispatch;
pub mod error;
pub mod navigator;
pub mod policy;
pub mod portal;
pub mod route;

pub use dispatch::{dispatch, DashboardView, Dispatch};
pub use error::{PortalError, PortalResult};
pub use navigator::{Navigator, Screen};
pub use policy::{decide, Decision, GuardState};
pub use portal::login_at;
pub use route::{Route, RouteIntent};
