use std::fmt::Debug;

use crate::{
    db_types::Faq,
    traits::{FaqApiError, FaqManagement},
};

/// FAQ maintenance. Reads are public; writes are gated to admins at the HTTP layer.
pub struct FaqApi<B> {
    db: B,
}

impl<B> Debug for FaqApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FaqApi")
    }
}

impl<B> FaqApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> FaqApi<B>
where B: FaqManagement
{
    pub async fn create(&self, question: &str, answer: &str, category: Option<&str>) -> Result<Faq, FaqApiError> {
        self.db.insert_faq(question, answer, category).await
    }

    pub async fn all(&self) -> Result<Vec<Faq>, FaqApiError> {
        self.db.fetch_faqs().await
    }

    pub async fn update(
        &self,
        faq_id: i64,
        question: &str,
        answer: &str,
        category: Option<&str>,
    ) -> Result<Faq, FaqApiError> {
        self.db.update_faq(faq_id, question, answer, category).await
    }

    pub async fn delete(&self, faq_id: i64) -> Result<(), FaqApiError> {
        self.db.delete_faq(faq_id).await
    }
}
