//! Account registration.

use lor_guard::{Route, Screen};
use lor_model::{ProfessorRegistration, StudentRegistration};

use crate::cli::RegisterCommand;
use crate::output::{info, prompt_password, success};
use crate::CliError;

use super::navigate::describe;
use super::App;

/// Registers an account, then signs in with it.
pub async fn run_register(app: &mut App, cmd: RegisterCommand) -> crate::CliResult<()> {
    if app.navigator().go(Route::Register) != Screen::Page(Route::Register) {
        return Err(CliError::Validation(
            "already signed in, run `lor logout` first".to_string(),
        ));
    }

    let (email, password) = match cmd {
        RegisterCommand::Student {
            name,
            email,
            password,
            registration_number,
            examination_number,
            course,
        } => {
            let password = new_password(password)?;
            let registration = StudentRegistration {
                name,
                email: email.clone(),
                password: password.clone(),
                registration_number,
                examination_number,
                course,
            };
            app.auth().register_student(&registration).await?;
            (email, password)
        }
        RegisterCommand::Professor {
            name,
            email,
            password,
            user_id,
            department,
        } => {
            let password = new_password(password)?;
            let registration = ProfessorRegistration {
                name,
                email: email.clone(),
                password: password.clone(),
                user_id,
                department,
            };
            app.auth().register_professor(&registration).await?;
            (email, password)
        }
    };
    success(&format!("Account {email} created"));

    app.navigator().go(Route::SignIn);
    let screen = app.navigator().submit_login(email, password).await?;
    success("Signed in");
    info(&format!("Now at {}", describe(screen)));
    Ok(())
}

fn new_password(given: Option<String>) -> crate::CliResult<String> {
    let password = match given {
        Some(p) => p,
        None => {
            let p = prompt_password("Password: ")?;
            if p != prompt_password("Confirm password: ")? {
                return Err(CliError::Validation("Passwords do not match".to_string()));
            }
            p
        }
    };
    if password.len() < 6 {
        return Err(CliError::Validation(
            "password must be at least 6 characters".to_string(),
        ));
    }
    Ok(password)
}
