use sqlx::SqliteConnection;

use crate::{db_types::Notification, traits::NotificationApiError};

pub async fn insert_notification(
    user_id: i64,
    message: &str,
    kind: &str,
    conn: &mut SqliteConnection,
) -> Result<Notification, sqlx::Error> {
    sqlx::query_as("INSERT INTO notifications (user_id, message, kind) VALUES ($1, $2, $3) RETURNING *")
        .bind(user_id)
        .bind(message)
        .bind(kind)
        .fetch_one(conn)
        .await
}

pub async fn fetch_notifications_for_user(
    user_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(user_id)
        .fetch_all(conn)
        .await
}

/// Idempotent flip of the read flag: an already-read notification just reads back unchanged.
pub async fn mark_notification_read(
    notification_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Notification, NotificationApiError> {
    let result: Option<Notification> =
        sqlx::query_as("UPDATE notifications SET is_read = 1 WHERE id = $1 RETURNING *")
            .bind(notification_id)
            .fetch_optional(conn)
            .await?;
    result.ok_or(NotificationApiError::NotificationNotFound(notification_id))
}

pub async fn unread_count(user_id: i64, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = 0")
        .bind(user_id)
        .fetch_one(conn)
        .await
}
