use serde_json::Value;
use thiserror::Error;

use crate::db_types::{NewUser, User, UserUpdate};

#[derive(Debug, Clone, Error)]
pub enum IdentityApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Email already in use: {0}")]
    EmailInUse(String),
    #[error("The requested user id {0} does not exist")]
    UserNotFound(i64),
    #[error("No account exists for email {0}")]
    EmailNotFound(String),
    #[error("User {0} is not a vendor")]
    NotAVendor(i64),
    #[error("Email {0} is already verified")]
    AlreadyVerified(String),
}

impl From<sqlx::Error> for IdentityApiError {
    fn from(e: sqlx::Error) -> Self {
        IdentityApiError::DatabaseError(e.to_string())
    }
}

/// Account storage. Covers self-service signup and profile flows as well as the admin surface
/// over the user directory.
#[allow(async_fn_in_trait)]
pub trait IdentityManagement {
    /// Insert a new account. Fails with [`IdentityApiError::EmailInUse`] when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, IdentityApiError>;

    async fn fetch_user(&self, user_id: i64) -> Result<Option<User>, IdentityApiError>;

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, IdentityApiError>;

    async fn fetch_all_users(&self) -> Result<Vec<User>, IdentityApiError>;

    /// Self-service profile update: display name and/or the free-form profile document.
    async fn update_profile(
        &self,
        user_id: i64,
        name: Option<String>,
        profile_details: Option<Value>,
    ) -> Result<User, IdentityApiError>;

    /// Admin update of the mutable account fields. `None` fields are left untouched.
    async fn update_user(&self, user_id: i64, update: UserUpdate) -> Result<User, IdentityApiError>;

    async fn delete_user(&self, user_id: i64) -> Result<(), IdentityApiError>;

    /// Flip the verification flag for the account holding `email`.
    /// Fails with [`IdentityApiError::AlreadyVerified`] if it is already set.
    async fn mark_email_verified(&self, email: &str) -> Result<User, IdentityApiError>;

    /// Approve or reject a vendor account. Sets the verification flag and the approval status
    /// together. Fails with [`IdentityApiError::NotAVendor`] for non-vendor accounts.
    async fn set_vendor_approval(&self, user_id: i64, approved: bool) -> Result<User, IdentityApiError>;
}
