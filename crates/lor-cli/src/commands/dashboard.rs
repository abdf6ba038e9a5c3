//! Dashboard command.

use lor_guard::{DashboardView, Route, Screen};
use lor_model::{DashboardStats, RequestList};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::config::OutputFormat;
use crate::output::{info, output, output_single, warning};
use crate::CliError;

use super::request::rows;
use super::App;

/// Cache entry holding the last loaded dashboard.
pub const DASHBOARD_CACHE: &str = "dashboard";

/// Data behind each dashboard view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum DashboardData {
    /// The student's own requests.
    Student {
        /// Requests.
        requests: RequestList,
    },
    /// Requests addressed to the professor.
    Professor {
        /// Requests.
        requests: RequestList,
    },
    /// System statistics.
    Admin {
        /// Counters.
        stats: DashboardStats,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: u64,
}

impl DashboardData {
    /// View this data was loaded for.
    #[must_use]
    pub const fn view(&self) -> DashboardView {
        match self {
            Self::Student { .. } => DashboardView::Student,
            Self::Professor { .. } => DashboardView::Professor,
            Self::Admin { .. } => DashboardView::Admin,
        }
    }
}

/// Shows the dashboard picked for the signed-in role.
pub async fn run_dashboard(app: &mut App, cached: bool) -> crate::CliResult<()> {
    let view = match app.navigator().go(Route::Dashboard) {
        Screen::Dashboard(view) => view,
        Screen::Page(Route::Landing) => {
            warning("Your account role is not recognized. You have been signed out.");
            return Err(CliError::NotSignedIn);
        }
        _ => return Err(CliError::NotSignedIn),
    };

    if cached {
        return match app.api().cache().get::<DashboardData>(DASHBOARD_CACHE) {
            Some(data) if data.view() == view => {
                info("Showing cached dashboard");
                render(&data, app.format())
            }
            _ => {
                info("No cached dashboard. Run `lor dashboard` while online.");
                Ok(())
            }
        };
    }

    let data = load(app, view).await?;
    app.api().cache().put(DASHBOARD_CACHE, &data);
    render(&data, app.format())
}

async fn load(app: &App, view: DashboardView) -> crate::CliResult<DashboardData> {
    let api = app.api();
    Ok(match view {
        DashboardView::Student => DashboardData::Student {
            requests: api.student_requests().await?,
        },
        DashboardView::Professor => DashboardData::Professor {
            requests: api.professor_requests().await?,
        },
        DashboardView::Admin => DashboardData::Admin {
            stats: api.dashboard_stats().await?,
        },
    })
}

/// Prints dashboard data.
pub fn render(data: &DashboardData, format: OutputFormat) -> crate::CliResult<()> {
    if !matches!(format, OutputFormat::Table) {
        return output_single(data, format);
    }

    match data {
        DashboardData::Student { requests } => {
            info(&format!("My requests ({})", requests.count));
            output(&rows(&requests.requests), format)
        }
        DashboardData::Professor { requests } => {
            let pending = requests
                .requests
                .iter()
                .filter(|r| r.status == lor_model::RequestStatus::Pending)
                .count();
            info(&format!(
                "Received requests ({}, {} pending)",
                requests.count, pending
            ));
            output(&rows(&requests.requests), format)
        }
        DashboardData::Admin { stats } => output(&stat_rows(stats), format),
    }
}

fn stat_rows(stats: &DashboardStats) -> Vec<StatRow> {
    let row = |metric, value| StatRow { metric, value };
    vec![
        row("Students", stats.users.total_students),
        row("Active students", stats.users.active_students),
        row("Professors", stats.users.total_professors),
        row("Active professors", stats.users.active_professors),
        row("Admins", stats.users.total_admins),
        row("Requests", stats.requests.total_requests),
        row("Pending", stats.requests.pending_requests),
        row("Approved", stats.requests.approved_requests),
        row("Rejected", stats.requests.rejected_requests),
        row("PDFs", stats.pdfs.total_pdfs),
        row("PDF bytes", stats.pdfs.total_file_size),
    ]
}
