use thiserror::Error;

use crate::{
    db_types::{NewProduct, Product, ProductUpdate},
    objects::ProductWithVendor,
};

#[derive(Debug, Clone, Error)]
pub enum CatalogApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("The requested product {0} does not exist")]
    ProductNotFound(i64),
    #[error("You can only modify your own products")]
    NotYourProduct,
}

impl From<sqlx::Error> for CatalogApiError {
    fn from(e: sqlx::Error) -> Self {
        CatalogApiError::DatabaseError(e.to_string())
    }
}

/// Product catalog storage. Listings are deliberately *not* filtered on the approval flag;
/// approval only drives the admin dashboard.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    async fn insert_product(&self, vendor_id: i64, product: NewProduct) -> Result<Product, CatalogApiError>;

    async fn fetch_product(&self, product_id: i64) -> Result<Option<Product>, CatalogApiError>;

    async fn fetch_all_products(&self) -> Result<Vec<Product>, CatalogApiError>;

    async fn fetch_products_for_vendor(&self, vendor_id: i64) -> Result<Vec<Product>, CatalogApiError>;

    /// Case-insensitive substring match against product name or category, capped at `limit` rows.
    async fn search_products(&self, query: &str, limit: i64) -> Result<Vec<Product>, CatalogApiError>;

    async fn update_product(&self, product_id: i64, update: ProductUpdate) -> Result<Product, CatalogApiError>;

    async fn delete_product(&self, product_id: i64) -> Result<(), CatalogApiError>;

    /// Approve (`true`) or reject (`false`) a product. Rejection clears the same flag approval
    /// sets; there is no distinct rejected state for products.
    async fn set_product_approval(&self, product_id: i64, approved: bool) -> Result<Product, CatalogApiError>;

    /// All products joined with their owning vendor's email, for the moderation dashboard.
    async fn fetch_products_with_vendors(&self) -> Result<Vec<ProductWithVendor>, CatalogApiError>;
}
