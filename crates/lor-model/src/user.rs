//! User domain model.
//!
//! The client never fetches a user record on its own. A [`User`] is built
//! from the claims of the bearer token at login time and persisted next to
//! the token so it can be restored on the next start.

use serde::{Deserialize, Serialize};

use crate::role::{InvalidRole, Role};

/// Numeric account identifier assigned by the remote API.
pub type UserId = i64;

/// The signed-in user.
///
/// `role` keeps the raw wire value. A record restored from disk or decoded
/// from a token may carry a value outside the known set, and the route
/// guard must be able to see that value to reject it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, also used as the login name.
    pub email: String,
    /// Raw role name as issued by the remote API.
    pub role: String,
    /// Whether the account is active.
    #[serde(default = "default_active")]
    pub is_active: bool,

    // === Student fields ===
    /// University registration number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    /// Examination roll number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examination_number: Option<String>,
    /// Course of study.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,

    // === Professor fields ===
    /// Staff identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

const fn default_active() -> bool {
    true
}

impl User {
    /// Creates a user with no role-specific fields.
    #[must_use]
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: role.into(),
            is_active: true,
            registration_number: None,
            examination_number: None,
            course: None,
            user_id: None,
            department: None,
        }
    }

    /// Parses the raw role into a known [`Role`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRole`] when the stored value is not one of the
    /// three known roles.
    pub fn parsed_role(&self) -> Result<Role, InvalidRole> {
        self.role.parse()
    }

    /// Checks if the user holds the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role.as_str()
    }
}

/// Payload for `POST /auth/register/student`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRegistration {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// University registration number.
    pub registration_number: String,
    /// Examination roll number.
    pub examination_number: String,
    /// Course of study.
    pub course: String,
}

/// Payload for `POST /auth/register/professor`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorRegistration {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Staff identifier.
    pub user_id: String,
    /// Department.
    pub department: String,
}
