//! Composite objects returned by the public API: database rows joined with the context the
//! frontend surfaces need (cart lines with their products, orders with customer detail, etc.)

use chrono::{DateTime, Utc};
use mh_common::Price;
use serde::Serialize;
use sqlx::FromRow;

use crate::db_types::{Order, OrderItem, Product};

//--------------------------------------      CartView        ---------------------------------------------------------
/// A cart as the client sees it. "No cart row yet" and "empty cart" are the same thing, so a
/// missing cart reads back as `CartView { cart_id: None, items: [] }` rather than an error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CartView {
    pub cart_id: Option<i64>,
    pub items: Vec<CartLine>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartLine {
    #[sqlx(flatten)]
    pub product: Product,
    pub quantity: i64,
}

impl CartView {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn quantity_of(&self, product_id: i64) -> Option<i64> {
        self.items.iter().find(|line| line.product.id == product_id).map(|line| line.quantity)
    }
}

//--------------------------------------     OrderDetail      ---------------------------------------------------------
/// An order together with its line items and its (de-duplicated) vendor set.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub vendor_ids: Vec<i64>,
}

impl OrderDetail {
    pub fn involves_vendor(&self, vendor_id: i64) -> bool {
        self.vendor_ids.contains(&vendor_id)
    }
}

//--------------------------------------   AdminOrderView     ---------------------------------------------------------
/// The moderation dashboard's order row: the order plus customer identity and named line items.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOrderView {
    #[serde(flatten)]
    pub order: Order,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<AdminOrderLine>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminOrderLine {
    pub product_id: i64,
    pub name: String,
    pub price: Price,
    pub quantity: i64,
}

//--------------------------------------  ProductWithVendor   ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductWithVendor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub product: Product,
    pub vendor_email: String,
}

//--------------------------------------     ReviewView       ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewView {
    pub id: i64,
    pub product_id: i64,
    pub customer_id: i64,
    pub rating: i64,
    pub comment: String,
    pub reviewer_name: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------     SalesReport      ---------------------------------------------------------
/// Monthly sales aggregation for one vendor: units sold per calendar month, plus grand totals.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    pub total_sales: i64,
    pub total_revenue: Price,
    pub sales_by_month: Vec<MonthlySales>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySales {
    pub month: String,
    pub units: i64,
}

/// Three-letter month names in calendar order, indexed by `month - 1`.
pub const MONTH_NAMES: [&str; 12] =
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
