//! Data types that are shared between the database backends and the public API.

use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use mh_common::Price;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, Type};
use thiserror::Error;

// Re-exported so that downstream crates can build `User` values without a direct sqlx dependency.
pub use sqlx::types::Json;

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ConversionError(String);

//--------------------------------------        Role          ---------------------------------------------------------
/// The role attached to an account. Every authenticated request resolves to exactly one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Vendor,
    Admin,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Vendor => write!(f, "vendor"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "vendor" => Ok(Self::Vendor),
            "admin" => Ok(Self::Admin),
            s => Err(ConversionError(format!("Invalid role: {s}. Allowed roles: customer, vendor, admin"))),
        }
    }
}

//--------------------------------------    AccountStatus     ---------------------------------------------------------
/// Moderation status of an account. Only meaningful for vendor accounts, which start out `Pending`
/// until an admin approves or rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Pending,
    Approved,
    Rejected,
}

impl Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStatus::Pending => write!(f, "pending"),
            AccountStatus::Approved => write!(f, "approved"),
            AccountStatus::Rejected => write!(f, "rejected"),
        }
    }
}

//--------------------------------------     OrderStatus      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatus {
    /// The order has been placed and no vendor has acted on it yet.
    Pending,
    /// A vendor has acknowledged the order.
    Confirmed,
    Shipped,
    Delivered,
    /// The order was cancelled, either by the customer (only while `Pending`) or by a privileged actor.
    Cancelled,
    /// Dispute resolution outcomes, set by an admin.
    Refunded,
    Disputed,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Confirmed => write!(f, "Confirmed"),
            OrderStatus::Shipped => write!(f, "Shipped"),
            OrderStatus::Delivered => write!(f, "Delivered"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
            OrderStatus::Refunded => write!(f, "Refunded"),
            OrderStatus::Disputed => write!(f, "Disputed"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Confirmed" => Ok(Self::Confirmed),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            "Refunded" => Ok(Self::Refunded),
            "Disputed" => Ok(Self::Disputed),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

//--------------------------------------  DisputeResolution   ---------------------------------------------------------
/// The narrowed set of statuses an admin may assign when resolving a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisputeResolution {
    Refunded,
    Disputed,
    Cancelled,
}

impl DisputeResolution {
    pub fn as_status(&self) -> OrderStatus {
        match self {
            DisputeResolution::Refunded => OrderStatus::Refunded,
            DisputeResolution::Disputed => OrderStatus::Disputed,
            DisputeResolution::Cancelled => OrderStatus::Cancelled,
        }
    }
}

impl FromStr for DisputeResolution {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Refunded" => Ok(Self::Refunded),
            "Disputed" => Ok(Self::Disputed),
            "Cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid resolution status: {s}"))),
        }
    }
}

//--------------------------------------        User          ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// The argon2-encoded credential. Never serialized into responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub profile_details: Json<Value>,
    pub is_verified: bool,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub profile_details: Value,
    pub is_verified: bool,
    pub status: AccountStatus,
}

impl NewUser {
    /// A self-service signup. The account starts unverified, and vendors start `Pending`.
    pub fn signup(name: String, email: String, password_hash: String, role: Role) -> Self {
        Self {
            name,
            email,
            password_hash,
            role,
            profile_details: Value::Object(Default::default()),
            is_verified: false,
            status: AccountStatus::Pending,
        }
    }

    /// An admin-created account. Admin accounts are born verified and approved; everyone else
    /// goes through the same pending/unverified state as a signup.
    pub fn created_by_admin(name: String, email: String, password_hash: String, role: Role) -> Self {
        let is_admin = role == Role::Admin;
        Self {
            name,
            email,
            password_hash,
            role,
            profile_details: Value::Object(Default::default()),
            is_verified: is_admin,
            status: if is_admin { AccountStatus::Approved } else { AccountStatus::Pending },
        }
    }

    pub fn with_profile(mut self, profile: Value) -> Self {
        self.profile_details = profile;
        self
    }
}

/// The mutable subset of account fields an admin may overwrite. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub is_verified: Option<bool>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none() && self.is_verified.is_none()
    }
}

//--------------------------------------       Product        ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: i64,
    pub vendor_id: i64,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub category: String,
    pub stock: i64,
    pub image_url: String,
    /// Moderator approval. Not filtered on in customer listings; it only drives the admin dashboard.
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub category: String,
    pub stock: i64,
    pub image_url: Option<String>,
}

/// Partial product update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub image_url: Option<String>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.stock.is_none()
            && self.image_url.is_none()
    }
}

//--------------------------------------        Cart          ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cart {
    pub id: i64,
    pub customer_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------        Order         ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    /// Sum of `price × quantity` over the line items, evaluated once at creation time.
    /// Immutable afterwards; later price changes on products do not touch it.
    pub total_amount: Price,
    #[sqlx(flatten)]
    pub shipping_address: ShippingAddress,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A (product, quantity) line snapshotted into an order at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// The fully-resolved input to the order insert: line items validated against the catalog, the
/// total computed, and the vendor set de-duplicated. Built by `OrderFlowApi::place_order`.
#[derive(Debug, Clone)]
pub struct ResolvedOrder {
    pub customer_id: i64,
    pub items: Vec<OrderItem>,
    pub vendor_ids: Vec<i64>,
    pub total_amount: Price,
    pub shipping_address: ShippingAddress,
}

//--------------------------------------     Notification     ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------       Review         ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: i64,
    pub product_id: i64,
    pub customer_id: i64,
    pub rating: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: i64,
    pub customer_id: i64,
    pub rating: i64,
    pub comment: String,
}

//--------------------------------------      AuditLog        ---------------------------------------------------------
/// Append-only record of a security-relevant action. Never mutated or deleted through the API.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLogEntry {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------        Faq           ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}
