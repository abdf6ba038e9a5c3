//! # lor-client
//!
//! HTTP client for the LOR request-management API.
//!
//! - [`HttpTransport`] - base URL, timeouts and response handling
//! - [`AuthEndpoint`] - login and registration; plugs into the session
//!   manager as its [`AuthApi`](lor_session::AuthApi)
//! - [`LorApi`] - calls made on behalf of the signed-in user
//! - [`ResponseCache`] - last-seen payloads kept in client storage
//!
//! Every [`LorApi`] call sends the session's bearer token. A `401` answer
//! ends the session globally before the error reaches the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod cache;
pub mod error;
pub mod transport;

pub use api::LorApi;
pub use auth::{AuthEndpoint, LoginResponse};
pub use cache::ResponseCache;
pub use error::{ClientError, ClientResult};
pub use transport::{ClientConfig, HttpTransport};
