use thiserror::Error;

use crate::{
    db_types::{NewReview, Review},
    objects::ReviewView,
};

#[derive(Debug, Clone, Error)]
pub enum ReviewApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("The requested review {0} does not exist")]
    ReviewNotFound(i64),
    #[error("You can only delete your own reviews")]
    NotYourReview,
}

impl From<sqlx::Error> for ReviewApiError {
    fn from(e: sqlx::Error) -> Self {
        ReviewApiError::DatabaseError(e.to_string())
    }
}

/// Review storage. No uniqueness constraint: the same customer may review a product repeatedly,
/// matching the observed system.
#[allow(async_fn_in_trait)]
pub trait ReviewManagement {
    async fn insert_review(&self, review: NewReview) -> Result<Review, ReviewApiError>;

    /// Reviews for a product with the reviewer's display name joined in.
    async fn fetch_reviews_for_product(&self, product_id: i64) -> Result<Vec<ReviewView>, ReviewApiError>;

    async fn fetch_review(&self, review_id: i64) -> Result<Option<Review>, ReviewApiError>;

    async fn delete_review(&self, review_id: i64) -> Result<(), ReviewApiError>;
}
