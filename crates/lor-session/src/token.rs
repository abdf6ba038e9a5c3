//! Bearer token decoding.
//!
//! The client reads the claims of the token it was issued so it can route
//! the user to the right dashboard. It does not verify the signature: the
//! claims are advisory for navigation only, and the remote API checks the
//! token on every call.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use lor_model::{User, UserId};
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// Claims carried in the payload segment of a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Subject: the account email.
    pub sub: String,
    /// Raw role name.
    pub role: String,
    /// Issued-at (seconds since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiry (seconds since epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Student registration number, when the issuer includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    /// Student examination number, when the issuer includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examination_number: Option<String>,
    /// Student course, when the issuer includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    /// Professor staff identifier, when the issuer includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Professor department, when the issuer includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl Claims {
    /// Builds the user record for these claims.
    ///
    /// The role is copied verbatim.
    #[must_use]
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.sub,
            role: self.role,
            is_active: true,
            registration_number: self.registration_number,
            examination_number: self.examination_number,
            course: self.course,
            user_id: self.user_id,
            department: self.department,
        }
    }
}

/// Decodes the claims of a `header.payload.signature` token.
///
/// # Errors
///
/// Returns [`SessionError::MalformedToken`] when the payload segment is
/// missing, is not base64, or does not hold the expected claims.
pub fn decode(token: &str) -> SessionResult<Claims> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| SessionError::MalformedToken("missing payload segment".to_string()))?;

    let bytes = decode_segment(payload)?;

    serde_json::from_slice(&bytes)
        .map_err(|e| SessionError::MalformedToken(format!("invalid claims: {e}")))
}

/// Decodes a base64url segment, tolerating padding and the standard alphabet.
fn decode_segment(segment: &str) -> SessionResult<Vec<u8>> {
    let trimmed = segment.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| SessionError::MalformedToken(format!("payload is not base64: {e}")))
}
