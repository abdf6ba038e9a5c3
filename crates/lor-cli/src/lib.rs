//! # lor-cli
//!
//! Command-line client for the LOR request-management system.
//!
//! This crate provides:
//! - Sign-in through the generic or a role-specific portal, sign-out
//! - Route checks (`lor open /admin`) using the same guard as the app
//! - The role-dependent dashboard, with an offline cached copy
//! - Student, professor and admin actions on LOR requests and accounts
//! - Local configuration in `~/.lor/lor.toml`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
