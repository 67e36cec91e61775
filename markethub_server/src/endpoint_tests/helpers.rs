use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use chrono::{TimeZone, Utc};
use markethub_engine::{
    db_types::{AccountStatus, Json, Order, OrderStatus, Product, Role, ShippingAddress, User},
    objects::OrderDetail,
};
use mh_common::{Price, Secret};
use serde::Serialize;

use crate::{auth::TokenIssuer, config::AuthConfig, middleware::JwtGateFactory};

// Creates a test `AuthConfig` for issuing tokens. DO NOT re-use this secret anywhere.
pub fn get_auth_config() -> AuthConfig {
    AuthConfig { jwt_secret: Secret::new("endpoint-test-secret-do-not-reuse".to_string()) }
}

pub fn issue_token(user_id: i64, role: Role) -> String {
    TokenIssuer::new(&get_auth_config()).issue_access_token(user_id, role).expect("Failed to sign token")
}

async fn send_request(
    req: TestRequest,
    auth_header: &str,
    configure: fn(&mut ServiceConfig),
) -> Result<(StatusCode, String), String> {
    let mut req = req;
    if !auth_header.is_empty() {
        req = req.insert_header(("Authorization", format!("Bearer {auth_header}")));
    }
    let req = req.to_request();
    let issuer = TokenIssuer::new(&get_auth_config());
    let app = App::new().wrap(JwtGateFactory::new(issuer)).configure(configure);

    let service = test::init_service(app).await;
    let (_, res) = test::try_call_service(&service, req).await.map_err(|e| e.to_string())?.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    Ok((status, body))
}

pub async fn get_request(
    auth_header: &str,
    path: &str,
    configure: fn(&mut ServiceConfig),
) -> Result<(StatusCode, String), String> {
    send_request(TestRequest::get().uri(path), auth_header, configure).await
}

pub async fn post_request<T: Serialize>(
    auth_header: &str,
    path: &str,
    body: &T,
    configure: fn(&mut ServiceConfig),
) -> Result<(StatusCode, String), String> {
    send_request(TestRequest::post().uri(path).set_json(body), auth_header, configure).await
}

pub async fn put_request<T: Serialize>(
    auth_header: &str,
    path: &str,
    body: &T,
    configure: fn(&mut ServiceConfig),
) -> Result<(StatusCode, String), String> {
    send_request(TestRequest::put().uri(path).set_json(body), auth_header, configure).await
}

pub async fn delete_request(
    auth_header: &str,
    path: &str,
    configure: fn(&mut ServiceConfig),
) -> Result<(StatusCode, String), String> {
    send_request(TestRequest::delete().uri(path), auth_header, configure).await
}

//----------------------------------------------  Fixtures  ------------------------------------------------------------
pub fn sample_user(id: i64, role: Role) -> User {
    let ts = Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap();
    User {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        password_hash: "argon2-hash".to_string(),
        role,
        profile_details: Json(serde_json::json!({})),
        is_verified: true,
        status: AccountStatus::Approved,
        created_at: ts,
        updated_at: ts,
    }
}

pub fn sample_product(id: i64, vendor_id: i64, price_cents: i64) -> Product {
    let ts = Utc.with_ymd_and_hms(2024, 2, 29, 13, 30, 0).unwrap();
    Product {
        id,
        vendor_id,
        name: format!("Product {id}"),
        price: Price::from(price_cents),
        description: String::new(),
        category: "general".to_string(),
        stock: 10,
        image_url: "https://via.placeholder.com/150".to_string(),
        approved: false,
        created_at: ts,
        updated_at: ts,
    }
}

pub fn sample_order(id: i64, customer_id: i64, vendor_ids: Vec<i64>, total_cents: i64) -> OrderDetail {
    let ts = Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap();
    OrderDetail {
        order: Order {
            id,
            customer_id,
            total_amount: Price::from(total_cents),
            shipping_address: ShippingAddress::default(),
            status: OrderStatus::Pending,
            created_at: ts,
            updated_at: ts,
        },
        items: vec![],
        vendor_ids,
    }
}
