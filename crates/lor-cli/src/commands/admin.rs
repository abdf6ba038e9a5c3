//! Administration commands.

use lor_model::{Role, User};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::AdminCommand;
use crate::output::{output, success};

use super::dashboard::{render, DashboardData};
use super::App;

/// Account row for display.
#[derive(Debug, Clone, Serialize, Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Active")]
    active: bool,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.clone(),
            active: u.is_active,
        }
    }
}

/// Runs an admin command.
pub async fn run_admin(app: &App, cmd: AdminCommand) -> crate::CliResult<()> {
    app.require_role(Role::Admin)?;
    let api = app.api();

    match cmd {
        AdminCommand::Stats => {
            let stats = api.dashboard_stats().await?;
            render(&DashboardData::Admin { stats }, app.format())
        }
        AdminCommand::Users => {
            let list = api.users().await?;
            let users: Vec<UserRow> = list.users.iter().map(UserRow::from).collect();
            output(&users, app.format())
        }
        AdminCommand::Toggle { user_id } => {
            let user = api.toggle_user_status(user_id).await?;
            success(&format!(
                "{} is now {}",
                user.email,
                if user.is_active { "active" } else { "inactive" }
            ));
            Ok(())
        }
    }
}
