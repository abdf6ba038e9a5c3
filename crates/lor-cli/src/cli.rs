//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use lor_guard::Route;
use lor_model::Role;

use crate::config::OutputFormat;

/// LOR CLI - request and review letters of recommendation.
#[derive(Debug, Parser)]
#[command(name = "lor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// API base URL (overrides config).
    #[arg(short, long, env = "LOR_SERVER_URL", global = true)]
    pub server: Option<String>,

    /// Output format (overrides config).
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in.
    Login(LoginArgs),

    /// Sign out and forget the stored session.
    Logout,

    /// Show the signed-in user.
    Whoami,

    /// Show where navigating to a path leads.
    Open {
        /// Client path, e.g. `/admin` or `/student-login`.
        path: String,
    },

    /// Show the dashboard for the signed-in role.
    Dashboard {
        /// Show the last loaded dashboard without contacting the server.
        #[arg(long)]
        cached: bool,
    },

    /// Create an account and sign in with it.
    #[command(subcommand)]
    Register(RegisterCommand),

    /// LOR request commands.
    #[command(subcommand)]
    Request(RequestCommand),

    /// Generated letter commands.
    #[command(subcommand)]
    Pdf(PdfCommand),

    /// Administration commands.
    #[command(subcommand)]
    Admin(AdminCommand),

    /// Configuration management.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Sign-in portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Portal {
    /// Student portal.
    Student,
    /// Professor portal.
    Professor,
    /// Admin portal.
    Admin,
}

impl Portal {
    /// Route of the portal's sign-in form.
    #[must_use]
    pub const fn route(self) -> Route {
        Route::portal_for(match self {
            Self::Student => Role::Student,
            Self::Professor => Role::Professor,
            Self::Admin => Role::Admin,
        })
    }
}

/// Arguments of `lor login`.
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Role-specific portal. Without it any role may sign in.
    #[arg(short, long, value_enum)]
    pub portal: Option<Portal>,

    /// Email address (prompted if omitted).
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password (prompted if omitted).
    #[arg(long, env = "LOR_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Registration commands.
#[derive(Debug, Subcommand)]
pub enum RegisterCommand {
    /// Register a student account.
    Student {
        /// Full name.
        #[arg(long)]
        name: String,

        /// Email address.
        #[arg(long)]
        email: String,

        /// Password (prompted if omitted).
        #[arg(long)]
        password: Option<String>,

        /// University registration number.
        #[arg(long)]
        registration_number: String,

        /// Examination roll number.
        #[arg(long)]
        examination_number: String,

        /// Course of study.
        #[arg(long)]
        course: String,
    },

    /// Register a professor account.
    Professor {
        /// Full name.
        #[arg(long)]
        name: String,

        /// Email address.
        #[arg(long)]
        email: String,

        /// Password (prompted if omitted).
        #[arg(long)]
        password: Option<String>,

        /// Staff identifier.
        #[arg(long)]
        user_id: String,

        /// Department.
        #[arg(long)]
        department: String,
    },
}

/// LOR request commands.
#[derive(Debug, Subcommand)]
pub enum RequestCommand {
    /// Ask a professor for a letter (students).
    Create {
        /// Professor ID (see `lor request professors`).
        #[arg(long)]
        professor: i64,

        /// Semester.
        #[arg(long)]
        semester: String,

        /// Academic session, e.g. 2023-24.
        #[arg(long)]
        session: String,

        /// Class roll number.
        #[arg(long)]
        roll_number: String,

        /// Institute or company the letter is addressed to.
        #[arg(long)]
        institute: String,
    },

    /// List own requests (students) or received requests (professors).
    List,

    /// List approved requests (students).
    Approved,

    /// List requests awaiting review (professors).
    Pending,

    /// Approve a request (professors).
    Approve {
        /// Request ID.
        id: i64,

        /// Remarks for the student.
        #[arg(long, default_value = "")]
        comments: String,
    },

    /// Reject a request (professors).
    Reject {
        /// Request ID.
        id: i64,

        /// Remarks for the student.
        #[arg(long, default_value = "")]
        comments: String,
    },

    /// Delete a request (students).
    Delete {
        /// Request ID.
        id: i64,

        /// Skip confirmation.
        #[arg(long)]
        force: bool,
    },

    /// List professors a request can be sent to.
    Professors,
}

/// Generated letter commands.
#[derive(Debug, Subcommand)]
pub enum PdfCommand {
    /// Generate the letter for an approved request.
    Generate {
        /// Request ID.
        request_id: i64,
    },

    /// Download a generated letter.
    Download {
        /// Reference number.
        reference: String,

        /// Target file (defaults to `<reference>.pdf`).
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Administration commands.
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Show system statistics.
    Stats,

    /// List all accounts.
    Users,

    /// Activate or deactivate an account.
    Toggle {
        /// Account ID.
        user_id: i64,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,

        /// Configuration value.
        value: String,
    },

    /// Print the configuration file path.
    Path,
}
