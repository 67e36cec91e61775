use std::fmt::Debug;

use crate::{
    db_types::Notification,
    traits::{NotificationApiError, NotificationManagement},
};

/// Read/write surface over the notification outbox.
pub struct NotificationApi<B> {
    db: B,
}

impl<B> Debug for NotificationApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NotificationApi")
    }
}

impl<B> NotificationApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> NotificationApi<B>
where B: NotificationManagement
{
    pub async fn create(&self, user_id: i64, message: &str, kind: &str) -> Result<Notification, NotificationApiError> {
        self.db.insert_notification(user_id, message, kind).await
    }

    pub async fn notifications_for(&self, user_id: i64) -> Result<Vec<Notification>, NotificationApiError> {
        self.db.fetch_notifications_for_user(user_id).await
    }

    /// Idempotent: marking twice leaves the flag set and succeeds both times.
    pub async fn mark_read(&self, notification_id: i64) -> Result<Notification, NotificationApiError> {
        self.db.mark_notification_read(notification_id).await
    }

    pub async fn unread_count(&self, user_id: i64) -> Result<i64, NotificationApiError> {
        self.db.unread_count(user_id).await
    }
}
