use sqlx::SqliteConnection;

use crate::{
    db_types::{NewReview, Review},
    objects::ReviewView,
    traits::ReviewApiError,
};

pub async fn insert_review(review: NewReview, conn: &mut SqliteConnection) -> Result<Review, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO reviews (product_id, customer_id, rating, comment) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(review.product_id)
    .bind(review.customer_id)
    .bind(review.rating)
    .bind(review.comment)
    .fetch_one(conn)
    .await
}

pub async fn fetch_reviews_for_product(
    product_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<ReviewView>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT reviews.*, users.name AS reviewer_name
        FROM reviews JOIN users ON users.id = reviews.customer_id
        WHERE reviews.product_id = $1
        ORDER BY reviews.created_at DESC, reviews.id DESC
        "#,
    )
    .bind(product_id)
    .fetch_all(conn)
    .await
}

pub async fn fetch_review(review_id: i64, conn: &mut SqliteConnection) -> Result<Option<Review>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM reviews WHERE id = $1").bind(review_id).fetch_optional(conn).await
}

pub async fn delete_review(review_id: i64, conn: &mut SqliteConnection) -> Result<(), ReviewApiError> {
    let res = sqlx::query("DELETE FROM reviews WHERE id = $1").bind(review_id).execute(conn).await?;
    if res.rows_affected() == 0 {
        return Err(ReviewApiError::ReviewNotFound(review_id));
    }
    Ok(())
}
