//! LOR request commands.

use lor_model::{CreateLorRequest, LorRequest, Role, User};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::RequestCommand;
use crate::output::{confirm, output, output_single, success};
use crate::CliError;

use super::App;

/// Request row for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RequestRow {
    /// Request ID.
    #[tabled(rename = "ID")]
    pub id: i64,
    /// Requesting student.
    #[tabled(rename = "Student")]
    pub student: String,
    /// Professor asked.
    #[tabled(rename = "Professor")]
    pub professor: String,
    /// Addressee.
    #[tabled(rename = "Institute/Company")]
    pub institute: String,
    /// Review state.
    #[tabled(rename = "Status")]
    pub status: String,
    /// Creation date.
    #[tabled(rename = "Requested")]
    pub requested: String,
    /// Generated letter reference.
    #[tabled(rename = "PDF")]
    pub pdf: String,
}

impl From<&LorRequest> for RequestRow {
    fn from(r: &LorRequest) -> Self {
        Self {
            id: r.id,
            student: r.student_name.clone(),
            professor: r.professor_name.clone(),
            institute: r.institute_company.clone(),
            status: r.status.to_string(),
            requested: r
                .requested_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            pdf: r.pdf_reference_number.clone().unwrap_or_default(),
        }
    }
}

/// Professor row for display.
#[derive(Debug, Clone, Serialize, Tabled)]
struct ProfessorRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Email")]
    email: String,
}

impl From<&User> for ProfessorRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            department: u.department.clone().unwrap_or_default(),
            email: u.email.clone(),
        }
    }
}

/// Converts requests to display rows.
#[must_use]
pub fn rows(requests: &[LorRequest]) -> Vec<RequestRow> {
    requests.iter().map(RequestRow::from).collect()
}

/// Runs a request command.
pub async fn run_request(app: &App, cmd: RequestCommand) -> crate::CliResult<()> {
    let api = app.api();
    let format = app.format();

    match cmd {
        RequestCommand::Create {
            professor,
            semester,
            session,
            roll_number,
            institute,
        } => {
            app.require_role(Role::Student)?;
            let request = CreateLorRequest {
                professor_id: professor,
                semester,
                session,
                class_roll_number: roll_number,
                institute_company: institute,
            };
            let created = api.create_request(&request).await?;
            success(&format!(
                "Request #{} sent to {}",
                created.id,
                if created.professor_name.is_empty() {
                    format!("professor #{}", created.professor_id)
                } else {
                    created.professor_name.clone()
                }
            ));
            output_single(&RequestRow::from(&created), format)
        }
        RequestCommand::List => {
            let user = app.require_user()?;
            let list = match user.parsed_role() {
                Ok(Role::Student) => api.student_requests().await?,
                Ok(Role::Professor) => api.professor_requests().await?,
                _ => return Err(CliError::WrongRole("student or professor".to_string())),
            };
            output(&rows(&list.requests), format)
        }
        RequestCommand::Approved => {
            app.require_role(Role::Student)?;
            let list = api.approved_requests().await?;
            output(&rows(&list.requests), format)
        }
        RequestCommand::Pending => {
            app.require_role(Role::Professor)?;
            let list = api.pending_requests().await?;
            output(&rows(&list.requests), format)
        }
        RequestCommand::Approve { id, comments } => {
            app.require_role(Role::Professor)?;
            let request = api.approve_request(id, &comments).await?;
            success(&format!("Request #{} approved", request.id));
            Ok(())
        }
        RequestCommand::Reject { id, comments } => {
            app.require_role(Role::Professor)?;
            let request = api.reject_request(id, &comments).await?;
            success(&format!("Request #{} rejected", request.id));
            Ok(())
        }
        RequestCommand::Delete { id, force } => {
            app.require_role(Role::Student)?;
            if !force && !confirm(&format!("Delete request #{id}?"))? {
                return Err(CliError::Cancelled);
            }
            let outcome = api.delete_request(id).await?;
            if outcome.success {
                success(&format!("Request #{id} deleted"));
                Ok(())
            } else {
                Err(CliError::Validation(outcome.message))
            }
        }
        RequestCommand::Professors => {
            app.require_user()?;
            let list = api.professors().await?;
            let professors: Vec<ProfessorRow> =
                list.professors.iter().map(ProfessorRow::from).collect();
            output(&professors, format)
        }
    }
}
