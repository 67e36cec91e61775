use thiserror::Error;

use crate::db_types::Notification;

#[derive(Debug, Clone, Error)]
pub enum NotificationApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("The requested notification {0} does not exist")]
    NotificationNotFound(i64),
}

impl From<sqlx::Error> for NotificationApiError {
    fn from(e: sqlx::Error) -> Self {
        NotificationApiError::DatabaseError(e.to_string())
    }
}

/// The notification outbox: per-user records written by producers (chiefly the order flow) and
/// drained by recipient polling. Records are never deleted; the only mutation is the read flag.
#[allow(async_fn_in_trait)]
pub trait NotificationManagement {
    async fn insert_notification(
        &self,
        user_id: i64,
        message: &str,
        kind: &str,
    ) -> Result<Notification, NotificationApiError>;

    /// All notifications for the user, most recent first.
    async fn fetch_notifications_for_user(&self, user_id: i64) -> Result<Vec<Notification>, NotificationApiError>;

    /// Idempotent: marking an already-read notification succeeds and leaves the flag set.
    async fn mark_notification_read(&self, notification_id: i64) -> Result<Notification, NotificationApiError>;

    async fn unread_count(&self, user_id: i64) -> Result<i64, NotificationApiError>;
}
