use log::debug;
use serde_json::Value;
use sqlx::{error::ErrorKind, types::Json, QueryBuilder, SqliteConnection};

use crate::{
    db_types::{NewUser, User, UserUpdate},
    traits::IdentityApiError,
};

pub async fn insert_user(user: NewUser, conn: &mut SqliteConnection) -> Result<User, IdentityApiError> {
    let result = sqlx::query_as::<_, User>(
        r#"
            INSERT INTO users (name, email, password_hash, role, profile_details, is_verified, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(user.name)
    .bind(user.email.clone())
    .bind(user.password_hash)
    .bind(user.role)
    .bind(Json(user.profile_details))
    .bind(user.is_verified)
    .bind(user.status)
    .fetch_one(conn)
    .await;
    match result {
        Ok(user) => {
            debug!("📝️ User [{}] inserted with id {}", user.email, user.id);
            Ok(user)
        },
        Err(e) if is_unique_violation(&e) => Err(IdentityApiError::EmailInUse(user.email)),
        Err(e) => Err(e.into()),
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error().map(|db| db.kind() == ErrorKind::UniqueViolation).unwrap_or(false)
}

pub async fn fetch_user_by_id(user_id: i64, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE id = $1").bind(user_id).fetch_optional(conn).await
}

pub async fn fetch_user_by_email(email: &str, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE email = $1").bind(email).fetch_optional(conn).await
}

pub async fn fetch_all_users(conn: &mut SqliteConnection) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users ORDER BY id").fetch_all(conn).await
}

pub async fn update_profile(
    user_id: i64,
    name: Option<String>,
    profile_details: Option<Value>,
    conn: &mut SqliteConnection,
) -> Result<User, IdentityApiError> {
    if name.is_none() && profile_details.is_none() {
        return fetch_user_by_id(user_id, conn).await?.ok_or(IdentityApiError::UserNotFound(user_id));
    }
    let mut builder = QueryBuilder::new("UPDATE users SET updated_at = CURRENT_TIMESTAMP, ");
    let mut set_clause = builder.separated(", ");
    if let Some(name) = name {
        set_clause.push("name = ");
        set_clause.push_bind_unseparated(name);
    }
    if let Some(profile) = profile_details {
        set_clause.push("profile_details = ");
        set_clause.push_bind_unseparated(Json(profile));
    }
    builder.push(" WHERE id = ");
    builder.push_bind(user_id);
    builder.push(" RETURNING *");
    let user = builder.build_query_as::<User>().fetch_optional(conn).await?;
    user.ok_or(IdentityApiError::UserNotFound(user_id))
}

pub async fn update_user(
    user_id: i64,
    update: UserUpdate,
    conn: &mut SqliteConnection,
) -> Result<User, IdentityApiError> {
    if update.is_empty() {
        return fetch_user_by_id(user_id, conn).await?.ok_or(IdentityApiError::UserNotFound(user_id));
    }
    let mut builder = QueryBuilder::new("UPDATE users SET updated_at = CURRENT_TIMESTAMP, ");
    let mut set_clause = builder.separated(", ");
    if let Some(name) = update.name {
        set_clause.push("name = ");
        set_clause.push_bind_unseparated(name);
    }
    if let Some(email) = update.email {
        set_clause.push("email = ");
        set_clause.push_bind_unseparated(email);
    }
    if let Some(role) = update.role {
        set_clause.push("role = ");
        set_clause.push_bind_unseparated(role);
    }
    if let Some(is_verified) = update.is_verified {
        set_clause.push("is_verified = ");
        set_clause.push_bind_unseparated(is_verified);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(user_id);
    builder.push(" RETURNING *");
    let user = builder.build_query_as::<User>().fetch_optional(conn).await?;
    user.ok_or(IdentityApiError::UserNotFound(user_id))
}

pub async fn delete_user(user_id: i64, conn: &mut SqliteConnection) -> Result<(), IdentityApiError> {
    let res = sqlx::query("DELETE FROM users WHERE id = $1").bind(user_id).execute(conn).await?;
    if res.rows_affected() == 0 {
        return Err(IdentityApiError::UserNotFound(user_id));
    }
    Ok(())
}

pub async fn mark_email_verified(email: &str, conn: &mut SqliteConnection) -> Result<User, IdentityApiError> {
    let user = fetch_user_by_email(email, conn)
        .await?
        .ok_or_else(|| IdentityApiError::EmailNotFound(email.to_string()))?;
    if user.is_verified {
        return Err(IdentityApiError::AlreadyVerified(email.to_string()));
    }
    let user = sqlx::query_as(
        "UPDATE users SET is_verified = 1, updated_at = CURRENT_TIMESTAMP WHERE id = $1 RETURNING *",
    )
    .bind(user.id)
    .fetch_one(conn)
    .await?;
    Ok(user)
}

/// Approving a vendor sets the verification flag and the approval status together; rejecting
/// clears the flag and sets the status to rejected.
pub async fn set_vendor_approval(
    user_id: i64,
    approved: bool,
    conn: &mut SqliteConnection,
) -> Result<User, IdentityApiError> {
    let user = fetch_user_by_id(user_id, conn).await?.ok_or(IdentityApiError::UserNotFound(user_id))?;
    if user.role != crate::db_types::Role::Vendor {
        return Err(IdentityApiError::NotAVendor(user_id));
    }
    let status = if approved { "approved" } else { "rejected" };
    let user = sqlx::query_as(
        "UPDATE users SET is_verified = $1, status = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $3 RETURNING *",
    )
    .bind(approved)
    .bind(status)
    .bind(user_id)
    .fetch_one(conn)
    .await?;
    Ok(user)
}
