use thiserror::Error;

use crate::db_types::AuditLogEntry;

#[derive(Debug, Clone, Error)]
pub enum AuditApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for AuditApiError {
    fn from(e: sqlx::Error) -> Self {
        AuditApiError::DatabaseError(e.to_string())
    }
}

/// Append-only audit trail of security-relevant actions. Entries are never mutated or deleted
/// through the API.
#[allow(async_fn_in_trait)]
pub trait AuditLogging {
    async fn record_action(&self, user_id: i64, action: &str, details: &str) -> Result<(), AuditApiError>;

    /// All entries, newest first. Admin-only at the HTTP layer.
    async fn fetch_audit_log(&self) -> Result<Vec<AuditLogEntry>, AuditApiError>;
}
