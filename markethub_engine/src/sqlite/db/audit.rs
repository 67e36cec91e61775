use sqlx::SqliteConnection;

use crate::db_types::AuditLogEntry;

pub async fn insert_entry(
    user_id: i64,
    action: &str,
    details: &str,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO audit_log (user_id, action, details) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(action)
        .bind(details)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<AuditLogEntry>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM audit_log ORDER BY created_at DESC, id DESC").fetch_all(conn).await
}
