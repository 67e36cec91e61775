use std::fmt::Debug;

use log::*;
use serde_json::Value;

use crate::{
    db_types::{NewUser, User},
    traits::{AuditLogging, IdentityApiError, IdentityManagement},
};

/// Account lifecycle for the self-service flows: signup, email verification, login lookup and
/// profile maintenance. Security-relevant actions are recorded in the audit log; a failed audit
/// write never fails the operation that triggered it.
pub struct IdentityApi<B> {
    db: B,
}

impl<B> Debug for IdentityApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IdentityApi")
    }
}

impl<B> IdentityApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> IdentityApi<B>
where B: IdentityManagement + AuditLogging
{
    pub async fn signup(&self, user: NewUser) -> Result<User, IdentityApiError> {
        let email = user.email.clone();
        let role = user.role;
        let user = self.db.create_user(user).await?;
        info!("👤️ New user registered: {email} (Role: {role})");
        self.audit(user.id, "User Signup", &format!("New user registered: {email} (Role: {role})")).await;
        Ok(user)
    }

    /// Mark the account holding `email` as verified. Fails if the account does not exist or is
    /// already verified.
    pub async fn verify_email(&self, email: &str) -> Result<User, IdentityApiError> {
        let user = self.db.mark_email_verified(email).await?;
        self.audit(user.id, "Email Verified", &format!("User {email} verified their email.")).await;
        Ok(user)
    }

    /// Fetch the account for a login attempt. Password verification happens at the HTTP layer,
    /// which holds the hashing machinery.
    pub async fn user_by_email(&self, email: &str) -> Result<Option<User>, IdentityApiError> {
        self.db.fetch_user_by_email(email).await
    }

    pub async fn user_by_id(&self, user_id: i64) -> Result<User, IdentityApiError> {
        self.db.fetch_user(user_id).await?.ok_or(IdentityApiError::UserNotFound(user_id))
    }

    pub async fn update_profile(
        &self,
        user_id: i64,
        name: Option<String>,
        profile_details: Option<Value>,
    ) -> Result<User, IdentityApiError> {
        let user = self.db.update_profile(user_id, name, profile_details).await?;
        self.audit(user_id, "Profile Update", &format!("User {} updated their profile.", user.email)).await;
        Ok(user)
    }

    /// Record a successful login in the audit trail.
    pub async fn record_login(&self, user: &User) {
        self.audit(user.id, "User Login", &format!("User {} logged in.", user.email)).await;
    }

    async fn audit(&self, user_id: i64, action: &str, details: &str) {
        if let Err(e) = self.db.record_action(user_id, action, details).await {
            error!("👤️ Could not write audit entry '{action}' for user {user_id}. {e}");
        }
    }
}
