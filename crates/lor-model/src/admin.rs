//! Admin dashboard payloads.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Response of `GET /admin/dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Account counters.
    pub users: UserStats,
    /// Request counters.
    pub requests: RequestStats,
    /// Generated document counters.
    pub pdfs: PdfStats,
    /// Directory counters.
    #[serde(default)]
    pub admin_data: AdminStats,
}

/// Account counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct UserStats {
    pub total_admins: u64,
    pub total_professors: u64,
    pub total_students: u64,
    pub active_students: u64,
    pub active_professors: u64,
}

/// Request counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct RequestStats {
    pub total_requests: u64,
    pub approved_requests: u64,
    pub pending_requests: u64,
    pub rejected_requests: u64,
}

/// Generated document counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PdfStats {
    pub total_pdfs: u64,
    pub total_file_size: u64,
}

/// Directory counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct AdminStats {
    pub total_admin_professors: u64,
    pub total_admin_students: u64,
}

/// `{ users, count }` envelope of `GET /admin/users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserList {
    /// All accounts.
    #[serde(default)]
    pub users: Vec<User>,
    /// Number of accounts reported by the server.
    #[serde(default)]
    pub count: usize,
}
