use std::fmt::Debug;

use log::*;

use crate::{
    objects::CartView,
    traits::{CartApiError, CartManagement, CatalogManagement},
};

/// Cart operations for the authenticated customer. Quantities are floored at line-removal:
/// decreasing a quantity-1 line removes it, and a set-quantity below 1 is rejected outright.
pub struct CartApi<B> {
    db: B,
}

impl<B> Debug for CartApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CartApi")
    }
}

impl<B> CartApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> CartApi<B>
where B: CartManagement + CatalogManagement
{
    /// Add `quantity` of a product, creating the cart lazily and incrementing the existing line
    /// if the product is already present. The product must exist; quantities below 1 are
    /// rejected. There is deliberately no upper bound and no stock check.
    pub async fn add_item(&self, customer_id: i64, product_id: i64, quantity: i64) -> Result<CartView, CartApiError> {
        if quantity < 1 {
            return Err(CartApiError::InvalidQuantity(quantity));
        }
        self.db
            .fetch_product(product_id)
            .await
            .map_err(|e| CartApiError::DatabaseError(e.to_string()))?
            .ok_or(CartApiError::ProductNotFound(product_id))?;
        let cart = self.db.add_cart_item(customer_id, product_id, quantity).await?;
        debug!("🧺️ Customer {customer_id} added {quantity} × product {product_id} to cart");
        Ok(cart)
    }

    pub async fn cart_for(&self, customer_id: i64) -> Result<CartView, CartApiError> {
        self.db.fetch_cart(customer_id).await
    }

    pub async fn increase_item(&self, cart_id: i64, product_id: i64) -> Result<CartView, CartApiError> {
        self.db.adjust_cart_item(cart_id, product_id, 1).await
    }

    /// Decrease a line's quantity by one, removing the line entirely when it would drop below 1.
    pub async fn decrease_item(&self, cart_id: i64, product_id: i64) -> Result<CartView, CartApiError> {
        self.db.adjust_cart_item(cart_id, product_id, -1).await
    }

    pub async fn set_item_quantity(
        &self,
        cart_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<CartView, CartApiError> {
        if quantity < 1 {
            return Err(CartApiError::InvalidQuantity(quantity));
        }
        self.db.set_cart_item_quantity(cart_id, product_id, quantity).await
    }

    /// Remove a product's line. Removing an absent line is a no-op, not an error.
    pub async fn remove_item(&self, customer_id: i64, product_id: i64) -> Result<CartView, CartApiError> {
        self.db.remove_cart_item(customer_id, product_id).await
    }

    /// Delete the cart document entirely. Not called automatically after checkout; the client
    /// drives it.
    pub async fn clear(&self, customer_id: i64) -> Result<(), CartApiError> {
        self.db.clear_cart(customer_id).await
    }
}
