use std::fmt::Display;

use markethub_engine::db_types::{OrderItem, ShippingAddress, User};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

//----------------------------------------------   Auth   --------------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to `customer` when omitted, as the observed signup form does.
    pub role: Option<String>,
    pub profile_details: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub profile_details: Option<Value>,
}

//----------------------------------------------   Cart   --------------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

//----------------------------------------------  Orders  --------------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
    pub products: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolveDisputeRequest {
    pub resolution: String,
}

//----------------------------------------------  Reviews  -------------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
pub struct AddReviewRequest {
    pub product_id: i64,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

//------------------------------------------  Notifications  -----------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotificationRequest {
    pub user_id: i64,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

//----------------------------------------------   FAQs   --------------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
pub struct FaqRequest {
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
}

//----------------------------------------------  Search  --------------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

//----------------------------------------------   Admin  --------------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}
