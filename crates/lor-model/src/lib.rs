//! # lor-model
//!
//! Domain types for the letter-of-recommendation (LOR) client.
//!
//! This crate holds the plain data shared by the session core, the route
//! guard and the HTTP client:
//! - [`Role`] - the closed set of account roles
//! - [`User`] - the user record derived from a bearer token
//! - LOR request, registration and admin statistics payloads

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod admin;
pub mod request;
pub mod role;
pub mod user;

pub use admin::{AdminStats, DashboardStats, PdfStats, RequestStats, UserList, UserStats};
pub use request::{
    CreateLorRequest, DeleteOutcome, GeneratedPdf, LorRequest, ProfessorList, RequestList,
    RequestStatus, ReviewComments,
};
pub use role::{InvalidRole, Role};
pub use user::{ProfessorRegistration, StudentRegistration, User, UserId};
