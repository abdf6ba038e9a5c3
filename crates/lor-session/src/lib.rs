//! # lor-session
//!
//! Session management for the LOR client.
//!
//! This crate owns the one piece of shared mutable state in the client:
//! the current session (bearer token plus the user derived from it).
//!
//! - [`ClientStorage`] - string key/value persistence (memory or file)
//! - [`CredentialStore`] - saves, loads and clears the token/user pair
//! - [`token::decode`] - reads claims from a bearer token without verifying it
//! - [`SessionManager`] - the single writer: hydrate, login, logout
//!
//! ## Ordering
//!
//! Every write persists first, then publishes the new [`AuthSnapshot`],
//! then emits a [`SessionEvent`]. A reader that sees an authenticated
//! snapshot can rely on the backing storage already holding it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod credential;
pub mod error;
pub mod manager;
pub mod state;
pub mod storage;
pub mod token;

pub use credential::{CredentialStore, TOKEN_KEY, USER_KEY};
pub use error::{SessionError, SessionResult};
pub use manager::{AuthApi, Credentials, SessionManager};
pub use state::{AuthSnapshot, ClearReason, Phase, Session, SessionEvent};
pub use storage::{ClientStorage, FileStorage, MemoryStorage};
pub use token::Claims;
