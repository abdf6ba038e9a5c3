//! Sign-in, sign-out and identity commands.

use lor_guard::{Route, Screen};

use crate::cli::{LoginArgs, Portal};
use crate::output::{info, output_single, prompt, prompt_password, success, warning};

use super::navigate::describe;
use super::App;

/// Signs in through the generic form or a role-specific portal.
pub async fn run_login(app: &mut App, args: LoginArgs) -> crate::CliResult<()> {
    let form = args.portal.map_or(Route::SignIn, Portal::route);

    // Signed-in users are bounced off every sign-in form.
    let mut screen = app.navigator().go(form);
    if screen != Screen::Page(form) {
        if let Some(user) = app.session().current_user() {
            info(&format!(
                "Already signed in as {} ({}). Run `lor logout` to switch accounts.",
                user.email, user.role
            ));
            info(&format!("Now at {}", describe(screen)));
            return Ok(());
        }
        // The stored session was ended on the way, e.g. for an unknown role.
        warning("Your previous session was not valid and has been signed out.");
        screen = app.navigator().go(form);
        if screen != Screen::Page(form) {
            return Err(crate::CliError::NotSignedIn);
        }
    }

    let username = match args.username {
        Some(u) => u,
        None => prompt("Email: ")?,
    };
    let password = match args.password {
        Some(p) => p,
        None => prompt_password("Password: ")?,
    };
    if username.trim().is_empty() || password.is_empty() {
        return Err(crate::CliError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let screen = app.navigator().submit_login(username.trim(), password).await?;
    let user = app.require_user()?;
    success(&format!("Signed in as {} ({})", user.name, user.role));
    info(&format!("Now at {}", describe(screen)));
    Ok(())
}

/// Signs out.
pub fn run_logout(app: &App) -> crate::CliResult<()> {
    if !app.session().is_authenticated() {
        info("Not signed in.");
        return Ok(());
    }
    app.session().logout();
    success("Signed out");
    Ok(())
}

/// Prints the signed-in user.
pub fn run_whoami(app: &App) -> crate::CliResult<()> {
    let user = app.require_user()?;
    output_single(&user, app.format())
}
