//! Letter-of-recommendation request payloads.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::user::{User, UserId};

/// Review state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Waiting for the professor.
    Pending,
    /// Approved; a letter may be generated.
    Approved,
    /// Rejected by the professor.
    Rejected,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        })
    }
}

/// A LOR request as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LorRequest {
    /// Request identifier.
    pub id: i64,
    /// Professor asked for the letter.
    pub professor_id: UserId,
    /// Professor display name.
    #[serde(default)]
    pub professor_name: String,
    /// Professor department.
    #[serde(default)]
    pub professor_department: String,
    /// Requesting student.
    #[serde(default)]
    pub student_name: String,
    /// Student registration number.
    #[serde(default)]
    pub registration_number: String,
    /// Student examination number.
    #[serde(default)]
    pub examination_number: String,
    /// Student course.
    #[serde(default)]
    pub course: String,
    /// Semester.
    pub semester: String,
    /// Academic session.
    pub session: String,
    /// Class roll number.
    pub class_roll_number: String,
    /// Institute or company the letter is addressed to.
    pub institute_company: String,
    /// Review state.
    pub status: RequestStatus,
    /// Professor remarks.
    #[serde(default)]
    pub professor_comments: Option<String>,
    /// Creation time (server local time).
    pub requested_at: Option<NaiveDateTime>,
    /// Approval or rejection time.
    #[serde(default)]
    pub processed_at: Option<NaiveDateTime>,
    /// Reference of the generated PDF.
    #[serde(default)]
    pub pdf_reference_number: Option<String>,
    /// File name of the generated PDF.
    #[serde(default)]
    pub pdf_file_name: Option<String>,
    /// Whether a PDF has been generated.
    #[serde(default)]
    pub has_pdf: bool,
}

/// Payload for `POST /lor-requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLorRequest {
    /// Professor asked for the letter.
    pub professor_id: UserId,
    /// Semester.
    pub semester: String,
    /// Academic session.
    pub session: String,
    /// Class roll number.
    pub class_roll_number: String,
    /// Institute or company the letter is addressed to.
    pub institute_company: String,
}

/// Payload for the approve and reject endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewComments {
    /// Remarks shown to the student.
    pub comments: String,
}

/// `{ requests, count }` envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestList {
    /// Requests.
    #[serde(default)]
    pub requests: Vec<LorRequest>,
    /// Number of requests reported by the server.
    #[serde(default)]
    pub count: usize,
}

/// `{ professors, count }` envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfessorList {
    /// Active professors.
    #[serde(default)]
    pub professors: Vec<User>,
    /// Number of professors reported by the server.
    #[serde(default)]
    pub count: usize,
}

/// Response of `DELETE /lor-requests/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutcome {
    /// Whether the request was deleted.
    pub success: bool,
    /// Server message.
    #[serde(default)]
    pub message: String,
}

/// Response of `POST /pdf/generate/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPdf {
    /// Stored file name.
    pub file_name: String,
    /// Reference used for downloads.
    pub reference_number: String,
    /// Size in bytes.
    pub file_size: u64,
}
