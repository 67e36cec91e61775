use actix_web::{http::StatusCode, web, web::ServiceConfig};
use markethub_engine::{db_types::Role, OrderFlowApi};
use serde_json::{json, Value};

use super::{
    helpers::{delete_request, get_request, issue_token, post_request, sample_order, sample_product},
    mocks::MockBackend,
};
use crate::routes::{CancelOrderRoute, MyOrdersRoute, PlaceOrderRoute};

fn configure(cfg: &mut ServiceConfig) {
    let mut backend = MockBackend::new();
    backend.expect_fetch_orders_for_customer().returning(|customer_id| {
        Ok(vec![sample_order(1, customer_id, vec![10], 2500), sample_order(2, customer_id, vec![10, 11], 4000)])
    });
    backend.expect_fetch_product().returning(|id| match id {
        1 => Ok(Some(sample_product(1, 10, 1000))),
        2 => Ok(Some(sample_product(2, 11, 500))),
        _ => Ok(None),
    });
    backend.expect_insert_order().returning(|resolved| {
        let mut order = sample_order(7, resolved.customer_id, resolved.vendor_ids, resolved.total_amount.value());
        order.items = resolved.items;
        Ok(order)
    });
    backend.expect_insert_notification().returning(|_, _, _| {
        Err(markethub_engine::NotificationApiError::DatabaseError("disk full".to_string()))
    });
    backend.expect_fetch_order().returning(|id| Ok(Some(sample_order(id, 99, vec![10], 1000))));
    let api = OrderFlowApi::new(backend);
    cfg.service(MyOrdersRoute::<MockBackend>::new())
        .service(PlaceOrderRoute::<MockBackend>::new())
        .service(CancelOrderRoute::<MockBackend>::new())
        .app_data(web::Data::new(api));
}

#[actix_web::test]
async fn fetch_my_orders_no_token() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("", "/orders", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("No token provided"));
}

#[actix_web::test]
async fn fetch_my_orders_invalid_sig() {
    let _ = env_logger::try_init().ok();
    let mut token = issue_token(1, Role::Customer);
    token.replace_range(token.len() - 10..token.len() - 5, "00000");
    let err = get_request(&token, "/orders", configure).await.expect_err("Expected error");
    assert!(err.contains("Bearer token is invalid"));
}

#[actix_web::test]
async fn fetch_my_orders_as_customer() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(42, Role::Customer);
    let (status, body) = get_request(&token, "/orders", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let orders: Value = serde_json::from_str(&body).expect("Body was not JSON");
    assert_eq!(orders.as_array().map(|a| a.len()), Some(2));
    assert_eq!(orders[0]["customer_id"], json!(42));
    assert_eq!(orders[0]["total_amount"], json!(2500));
    assert_eq!(orders[1]["vendor_ids"], json!([10, 11]));
}

#[actix_web::test]
async fn empty_checkout_is_rejected() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(42, Role::Customer);
    let body = json!({ "products": [], "shipping_address": shipping_json() });
    let (status, body) = post_request(&token, "/orders", &body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Order must contain at least one item"));
}

#[actix_web::test]
async fn checkout_survives_notification_failure() {
    // The mock's insert_notification always fails; the order must still come back 201.
    let _ = env_logger::try_init().ok();
    let token = issue_token(42, Role::Customer);
    let body = json!({
        "products": [
            { "product_id": 1, "quantity": 2 },
            { "product_id": 2, "quantity": 1 }
        ],
        "shipping_address": shipping_json()
    });
    let (status, body) = post_request(&token, "/orders", &body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::CREATED);
    let order: Value = serde_json::from_str(&body).expect("Body was not JSON");
    assert_eq!(order["total_amount"], json!(2500));
    assert_eq!(order["vendor_ids"], json!([10, 11]));
    assert_eq!(order["status"], json!("Pending"));
}

#[actix_web::test]
async fn checkout_with_unknown_product_is_a_404() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(42, Role::Customer);
    let body = json!({
        "products": [{ "product_id": 9999, "quantity": 1 }],
        "shipping_address": shipping_json()
    });
    let (status, body) = post_request(&token, "/orders", &body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("product 9999"));
}

#[actix_web::test]
async fn cancelling_someone_elses_order_is_forbidden() {
    // The mocked order belongs to customer 99; the caller is customer 42.
    let _ = env_logger::try_init().ok();
    let token = issue_token(42, Role::Customer);
    let (status, body) = delete_request(&token, "/orders/5/cancel", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("your own orders"));
}

fn shipping_json() -> Value {
    json!({
        "full_name": "Ada Lovelace",
        "address": "12 Analytical Way",
        "city": "London",
        "state": "LDN",
        "zip_code": "E1 6AN",
        "country": "UK"
    })
}
