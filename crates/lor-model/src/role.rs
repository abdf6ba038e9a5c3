//! Account roles.
//!
//! Every account has exactly one of three roles. The role decides which
//! dashboard a user lands on and which routes they may reach.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An account role.
///
/// The set is closed: any other value read from a token or from
/// persisted state is an [`InvalidRole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Requests letters from professors.
    Student,
    /// Reviews requests and issues letters.
    Professor,
    /// Manages accounts and oversees all requests.
    Admin,
}

/// A role value outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized role: {0}")]
pub struct InvalidRole(pub String);

impl Role {
    /// All known roles.
    pub const ALL: [Self; 3] = [Self::Student, Self::Professor, Self::Admin];

    /// Returns the wire name of the role (`STUDENT`, `PROFESSOR`, `ADMIN`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::Professor => "PROFESSOR",
            Self::Admin => "ADMIN",
        }
    }

    /// Returns the human-readable title of the role.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Professor => "Professor",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = InvalidRole;

    /// Parses a wire role name. Matching is exact; `student` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STUDENT" => Ok(Self::Student),
            "PROFESSOR" => Ok(Self::Professor),
            "ADMIN" => Ok(Self::Admin),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}
