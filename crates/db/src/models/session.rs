//! Admin session model and DTOs.

use haven_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// An admin session row from the `admin_sessions` table.
///
/// Only the SHA-256 hash of the session token is stored; the plaintext lives
/// solely in the client's cookie.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSession {
    pub id: DbId,
    pub username: String,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new admin session.
pub struct CreateAdminSession {
    pub username: String,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
