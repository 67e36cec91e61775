use thiserror::Error;

use crate::{
    db_types::{Order, OrderStatus, ResolvedOrder, Role},
    objects::{AdminOrderView, OrderDetail, SalesReport},
};

#[derive(Debug, Clone, Error)]
pub enum OrderApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order must contain at least one item")]
    EmptyOrder,
    #[error("The requested product {0} does not exist")]
    ProductNotFound(i64),
    #[error("The requested order {0} does not exist")]
    OrderNotFound(i64),
    #[error("You can only act on your own orders")]
    NotYourOrder,
    #[error("Order cannot be cancelled once it is {0}")]
    NotCancellable(OrderStatus),
    #[error("Role {0} may not perform this operation")]
    RoleNotAllowed(Role),
}

impl From<sqlx::Error> for OrderApiError {
    fn from(e: sqlx::Error) -> Self {
        OrderApiError::DatabaseError(e.to_string())
    }
}

/// Order storage. The write path takes a [`ResolvedOrder`] (line items already validated
/// against the catalog, total computed, vendor set de-duplicated) and persists it atomically.
/// Everything downstream of that single insert (vendor notifications) is best-effort and lives
/// in the flow API, not here.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Insert the order, its line items and its vendor set in one transaction, with status
    /// `Pending`. Returns the stored order with its context.
    async fn insert_order(&self, order: ResolvedOrder) -> Result<OrderDetail, OrderApiError>;

    async fn fetch_order(&self, order_id: i64) -> Result<Option<OrderDetail>, OrderApiError>;

    async fn fetch_orders_for_customer(&self, customer_id: i64) -> Result<Vec<OrderDetail>, OrderApiError>;

    /// Orders whose vendor set contains `vendor_id`.
    async fn fetch_orders_for_vendor(&self, vendor_id: i64) -> Result<Vec<OrderDetail>, OrderApiError>;

    /// Unrestricted listing with customer and product context, for the moderation dashboard.
    async fn fetch_all_orders(&self) -> Result<Vec<AdminOrderView>, OrderApiError>;

    /// Overwrite the order status. No transition graph is enforced here; callers gate who may
    /// reach this.
    async fn update_order_status(&self, order_id: i64, status: OrderStatus) -> Result<Order, OrderApiError>;

    /// Units and revenue for the vendor's own line items, grouped by calendar month of order
    /// creation. Revenue is `price × quantity` at the *live* product price, as the original
    /// report computed it.
    async fn sales_report_for_vendor(&self, vendor_id: i64) -> Result<SalesReport, OrderApiError>;
}
