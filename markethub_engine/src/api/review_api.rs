use std::fmt::Debug;

use crate::{
    db_types::{NewReview, Review},
    objects::ReviewView,
    traits::{ReviewApiError, ReviewManagement},
};

pub struct ReviewApi<B> {
    db: B,
}

impl<B> Debug for ReviewApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReviewApi")
    }
}

impl<B> ReviewApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> ReviewApi<B>
where B: ReviewManagement
{
    pub async fn add_review(&self, review: NewReview) -> Result<Review, ReviewApiError> {
        self.db.insert_review(review).await
    }

    pub async fn reviews_for_product(&self, product_id: i64) -> Result<Vec<ReviewView>, ReviewApiError> {
        self.db.fetch_reviews_for_product(product_id).await
    }

    /// Delete a review on behalf of its author. Anyone else gets `NotYourReview`.
    pub async fn delete_own_review(&self, customer_id: i64, review_id: i64) -> Result<(), ReviewApiError> {
        let review =
            self.db.fetch_review(review_id).await?.ok_or(ReviewApiError::ReviewNotFound(review_id))?;
        if review.customer_id != customer_id {
            return Err(ReviewApiError::NotYourReview);
        }
        self.db.delete_review(review_id).await
    }
}
