use thiserror::Error;

use crate::db_types::Faq;

#[derive(Debug, Clone, Error)]
pub enum FaqApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("The requested FAQ {0} does not exist")]
    FaqNotFound(i64),
}

impl From<sqlx::Error> for FaqApiError {
    fn from(e: sqlx::Error) -> Self {
        FaqApiError::DatabaseError(e.to_string())
    }
}

#[allow(async_fn_in_trait)]
pub trait FaqManagement {
    async fn insert_faq(&self, question: &str, answer: &str, category: Option<&str>) -> Result<Faq, FaqApiError>;

    async fn fetch_faqs(&self) -> Result<Vec<Faq>, FaqApiError>;

    async fn update_faq(
        &self,
        faq_id: i64,
        question: &str,
        answer: &str,
        category: Option<&str>,
    ) -> Result<Faq, FaqApiError>;

    async fn delete_faq(&self, faq_id: i64) -> Result<(), FaqApiError>;
}
