use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewProduct, Product, ProductUpdate, Role},
    traits::{CatalogApiError, CatalogManagement},
};

/// How many rows a catalog search returns at most.
pub const SEARCH_RESULT_LIMIT: i64 = 10;

/// Vendor-facing catalog operations plus the public read surface.
pub struct CatalogApi<B> {
    db: B,
}

impl<B> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi")
    }
}

impl<B> CatalogApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub async fn create_product(&self, vendor_id: i64, product: NewProduct) -> Result<Product, CatalogApiError> {
        let product = self.db.insert_product(vendor_id, product).await?;
        info!("🏷️ Vendor {vendor_id} listed product {} ({})", product.id, product.name);
        Ok(product)
    }

    pub async fn product(&self, product_id: i64) -> Result<Product, CatalogApiError> {
        self.db.fetch_product(product_id).await?.ok_or(CatalogApiError::ProductNotFound(product_id))
    }

    /// Vendors listing the catalog see only their own products; everyone else sees all of them.
    /// The approval flag is not filtered on; that matches the observed system.
    pub async fn products_for_identity(&self, user_id: i64, role: Role) -> Result<Vec<Product>, CatalogApiError> {
        match role {
            Role::Vendor => self.db.fetch_products_for_vendor(user_id).await,
            _ => self.db.fetch_all_products().await,
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogApiError> {
        self.db.search_products(query, SEARCH_RESULT_LIMIT).await
    }

    /// Update a product on behalf of its owning vendor. Anyone else gets `NotYourProduct`.
    pub async fn update_own_product(
        &self,
        vendor_id: i64,
        product_id: i64,
        update: ProductUpdate,
    ) -> Result<Product, CatalogApiError> {
        self.check_ownership(vendor_id, product_id).await?;
        self.db.update_product(product_id, update).await
    }

    pub async fn delete_own_product(&self, vendor_id: i64, product_id: i64) -> Result<(), CatalogApiError> {
        self.check_ownership(vendor_id, product_id).await?;
        self.db.delete_product(product_id).await?;
        info!("🏷️ Vendor {vendor_id} delisted product {product_id}");
        Ok(())
    }

    async fn check_ownership(&self, vendor_id: i64, product_id: i64) -> Result<(), CatalogApiError> {
        let product = self.product(product_id).await?;
        if product.vendor_id == vendor_id {
            Ok(())
        } else {
            debug!("🏷️ Vendor {vendor_id} tried to modify product {product_id} owned by {}", product.vendor_id);
            Err(CatalogApiError::NotYourProduct)
        }
    }
}
