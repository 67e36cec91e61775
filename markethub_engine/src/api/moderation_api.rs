use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{AuditLogEntry, NewUser, Product, User, UserUpdate},
    objects::{AdminOrderView, ProductWithVendor},
    traits::{AuditLogging, CatalogApiError, CatalogManagement, IdentityApiError, IdentityManagement, OrderApiError, OrderManagement},
};

/// The cross-cutting admin surface over users, products and orders. Every route reaching this
/// API has already passed the admin role gate; this layer only applies the remaining business
/// rules (vendor-only approval, product approve/reject symmetry, and so on).
pub struct ModerationApi<B> {
    db: B,
}

impl<B> Debug for ModerationApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ModerationApi")
    }
}

impl<B> ModerationApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> ModerationApi<B>
where B: IdentityManagement + CatalogManagement + OrderManagement + AuditLogging
{
    //----------------------------------------  Users  ----------------------------------------
    pub async fn all_users(&self) -> Result<Vec<User>, IdentityApiError> {
        self.db.fetch_all_users().await
    }

    pub async fn user(&self, user_id: i64) -> Result<User, IdentityApiError> {
        self.db.fetch_user(user_id).await?.ok_or(IdentityApiError::UserNotFound(user_id))
    }

    pub async fn update_user(&self, user_id: i64, update: UserUpdate) -> Result<User, IdentityApiError> {
        let user = self.db.update_user(user_id, update).await?;
        info!("🛡️ Admin updated user {user_id} ({})", user.email);
        Ok(user)
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<(), IdentityApiError> {
        self.db.delete_user(user_id).await?;
        warn!("🛡️ Admin deleted user {user_id}");
        Ok(())
    }

    /// Direct account creation, bypassing signup and email verification. Admin accounts start
    /// verified and approved; everyone else starts unverified and pending, like a signup.
    pub async fn create_user(&self, user: NewUser) -> Result<User, IdentityApiError> {
        let user = self.db.create_user(user).await?;
        info!("🛡️ Admin created user {} ({}, role {})", user.id, user.email, user.role);
        Ok(user)
    }

    pub async fn approve_vendor(&self, user_id: i64) -> Result<User, IdentityApiError> {
        let user = self.db.set_vendor_approval(user_id, true).await?;
        info!("🛡️ Vendor {user_id} approved");
        Ok(user)
    }

    pub async fn reject_vendor(&self, user_id: i64) -> Result<User, IdentityApiError> {
        let user = self.db.set_vendor_approval(user_id, false).await?;
        info!("🛡️ Vendor {user_id} rejected");
        Ok(user)
    }

    //---------------------------------------  Products  --------------------------------------
    pub async fn all_products(&self) -> Result<Vec<ProductWithVendor>, CatalogApiError> {
        self.db.fetch_products_with_vendors().await
    }

    pub async fn approve_product(&self, product_id: i64) -> Result<Product, CatalogApiError> {
        let product = self.db.set_product_approval(product_id, true).await?;
        info!("🛡️ Product {product_id} approved");
        Ok(product)
    }

    /// "Reject" clears the same flag approval sets. There is no distinct rejected state for
    /// products, unlike vendor accounts.
    pub async fn reject_product(&self, product_id: i64) -> Result<Product, CatalogApiError> {
        let product = self.db.set_product_approval(product_id, false).await?;
        info!("🛡️ Product {product_id} rejected");
        Ok(product)
    }

    //----------------------------------------  Orders  ---------------------------------------
    pub async fn all_orders(&self) -> Result<Vec<AdminOrderView>, OrderApiError> {
        self.db.fetch_all_orders().await
    }

    //---------------------------------------  Audit log  -------------------------------------
    pub async fn audit_log(&self) -> Result<Vec<AuditLogEntry>, crate::traits::AuditApiError> {
        self.db.fetch_audit_log().await
    }
}
