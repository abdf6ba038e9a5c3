//! End-to-End Integration Tests
//!
//! These tests drive the real client stack (reqwest transport, file
//! storage, session manager, guard) against an in-process fake of the
//! remote API that issues signed HS256 tokens.

mod api_flows;
mod common;
mod session_flows;
