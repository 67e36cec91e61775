use sqlx::SqliteConnection;

use crate::{db_types::Faq, traits::FaqApiError};

pub async fn insert_faq(
    question: &str,
    answer: &str,
    category: Option<&str>,
    conn: &mut SqliteConnection,
) -> Result<Faq, sqlx::Error> {
    sqlx::query_as("INSERT INTO faqs (question, answer, category) VALUES ($1, $2, $3) RETURNING *")
        .bind(question)
        .bind(answer)
        .bind(category)
        .fetch_one(conn)
        .await
}

pub async fn fetch_faqs(conn: &mut SqliteConnection) -> Result<Vec<Faq>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM faqs ORDER BY id").fetch_all(conn).await
}

pub async fn update_faq(
    faq_id: i64,
    question: &str,
    answer: &str,
    category: Option<&str>,
    conn: &mut SqliteConnection,
) -> Result<Faq, FaqApiError> {
    let faq: Option<Faq> =
        sqlx::query_as("UPDATE faqs SET question = $1, answer = $2, category = $3 WHERE id = $4 RETURNING *")
            .bind(question)
            .bind(answer)
            .bind(category)
            .bind(faq_id)
            .fetch_optional(conn)
            .await?;
    faq.ok_or(FaqApiError::FaqNotFound(faq_id))
}

pub async fn delete_faq(faq_id: i64, conn: &mut SqliteConnection) -> Result<(), FaqApiError> {
    let res = sqlx::query("DELETE FROM faqs WHERE id = $1").bind(faq_id).execute(conn).await?;
    if res.rows_affected() == 0 {
        return Err(FaqApiError::FaqNotFound(faq_id));
    }
    Ok(())
}
