use thiserror::Error;

use crate::objects::CartView;

#[derive(Debug, Clone, Error)]
pub enum CartApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Cart not found")]
    CartNotFound,
    #[error("Product {0} is not in the cart")]
    ProductNotInCart(i64),
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),
    #[error("The requested product {0} does not exist")]
    ProductNotFound(i64),
}

impl From<sqlx::Error> for CartApiError {
    fn from(e: sqlx::Error) -> Self {
        CartApiError::DatabaseError(e.to_string())
    }
}

/// Cart storage. Each customer has at most one cart row; "no cart" and "empty cart" are
/// equivalent states and both read back as an empty [`CartView`].
#[allow(async_fn_in_trait)]
pub trait CartManagement {
    /// Load-or-create the customer's cart, then increment the product's line by `quantity`,
    /// appending a new line if the product is not present yet.
    async fn add_cart_item(&self, customer_id: i64, product_id: i64, quantity: i64) -> Result<CartView, CartApiError>;

    async fn fetch_cart(&self, customer_id: i64) -> Result<CartView, CartApiError>;

    /// Filter the product's line out of the cart. Removing an absent line is a no-op, but the
    /// cart itself must exist.
    async fn remove_cart_item(&self, customer_id: i64, product_id: i64) -> Result<CartView, CartApiError>;

    /// Delete the cart row (and its lines) entirely. Idempotent.
    async fn clear_cart(&self, customer_id: i64) -> Result<(), CartApiError>;

    /// Adjust one line's quantity by `delta` (±1 in practice). Dropping to zero removes the line.
    async fn adjust_cart_item(&self, cart_id: i64, product_id: i64, delta: i64) -> Result<CartView, CartApiError>;

    /// Overwrite one line's quantity. The caller has already validated `quantity >= 1`.
    async fn set_cart_item_quantity(
        &self,
        cart_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<CartView, CartApiError>;
}
