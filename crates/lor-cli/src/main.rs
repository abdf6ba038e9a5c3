//! # LOR CLI
//!
//! Entry point of the `lor` binary.

#![forbid(unsafe_code)]

use clap::Parser;
use lor_cli::{
    cli::{Cli, Command},
    commands::{
        run_admin, run_config, run_dashboard, run_login, run_logout, run_open, run_pdf,
        run_register, run_request, run_whoami, App,
    },
    config::CliConfig,
    output::error,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match CliConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {}", e));
            std::process::exit(1);
        }
    };

    // Config commands must work even when the server settings are broken.
    let command = match cli.command {
        Command::Config(cmd) => {
            if let Err(e) = run_config(cmd, &mut config) {
                error(&e.to_string());
                std::process::exit(1);
            }
            return;
        }
        other => other,
    };

    let mut app = match App::new(config, cli.server.as_deref(), cli.output) {
        Ok(app) => app,
        Err(e) => {
            error(&e.to_string());
            std::process::exit(1);
        }
    };

    let result = match command {
        Command::Login(args) => run_login(&mut app, args).await,
        Command::Logout => run_logout(&app),
        Command::Whoami => run_whoami(&app),
        Command::Open { path } => run_open(&mut app, &path),
        Command::Dashboard { cached } => run_dashboard(&mut app, cached).await,
        Command::Register(cmd) => run_register(&mut app, cmd).await,
        Command::Request(cmd) => run_request(&app, cmd).await,
        Command::Pdf(cmd) => run_pdf(&app, cmd).await,
        Command::Admin(cmd) => run_admin(&app, cmd).await,
        Command::Config(_) => Ok(()),
    };

    if let Err(e) = result {
        error(&e.to_string());
        std::process::exit(1);
    }
}
