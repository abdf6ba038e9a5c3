//! Route inspection.

use lor_guard::{DashboardView, Route, Screen};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::output::output_single;

use super::App;

/// Outcome of `lor open`.
#[derive(Debug, Serialize)]
struct Landing {
    requested: String,
    route: Route,
    screen: String,
}

/// Runs the guard on a path and prints where the user ends up.
pub fn run_open(app: &mut App, path: &str) -> crate::CliResult<()> {
    let screen = app.navigator().navigate(path);
    let route = app.navigator().current();

    match app.format() {
        OutputFormat::Table => {
            if route.path() == path {
                println!("{}", describe(screen));
            } else {
                println!("{path} -> {}", describe(screen));
            }
            Ok(())
        }
        format => output_single(
            &Landing {
                requested: path.to_string(),
                route,
                screen: describe(screen),
            },
            format,
        ),
    }
}

/// Human-readable name of a screen.
#[must_use]
pub fn describe(screen: Screen) -> String {
    match screen {
        Screen::Waiting => "loading".to_string(),
        Screen::Page(route) => format!("{} ({})", route, page_name(route)),
        Screen::Dashboard(view) => format!("{} ({})", Route::Dashboard, dashboard_name(view)),
        Screen::AdminPanel => format!("{} (admin panel)", Route::Admin),
    }
}

const fn page_name(route: Route) -> &'static str {
    match route {
        Route::Landing => "home",
        Route::SignIn => "sign-in",
        Route::StudentLogin => "student sign-in",
        Route::ProfessorLogin => "professor sign-in",
        Route::AdminLogin => "admin sign-in",
        Route::Register => "registration",
        Route::Dashboard => "dashboard",
        Route::Admin => "admin panel",
    }
}

const fn dashboard_name(view: DashboardView) -> &'static str {
    match view {
        DashboardView::Student => "student dashboard",
        DashboardView::Professor => "professor dashboard",
        DashboardView::Admin => "admin dashboard",
    }
}
