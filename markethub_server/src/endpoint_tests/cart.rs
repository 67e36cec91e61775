use actix_web::{http::StatusCode, web, web::ServiceConfig};
use markethub_engine::{db_types::Role, objects::CartView, CartApi};
use serde_json::{json, Value};

use super::{
    helpers::{get_request, issue_token, post_request, put_request},
    mocks::MockBackend,
};
use crate::routes::{AddToCartRoute, GetCartRoute, UpdateCartItemRoute};

fn configure(cfg: &mut ServiceConfig) {
    let mut backend = MockBackend::new();
    backend.expect_fetch_cart().returning(|_| Ok(CartView::empty()));
    backend.expect_fetch_product().returning(|_| Ok(None));
    let api = CartApi::new(backend);
    cfg.service(GetCartRoute::<MockBackend>::new())
        .service(AddToCartRoute::<MockBackend>::new())
        .service(UpdateCartItemRoute::<MockBackend>::new())
        .app_data(web::Data::new(api));
}

#[actix_web::test]
async fn cart_requires_a_token() {
    let _ = env_logger::try_init().ok();
    let (status, _) = get_request("", "/cart", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn missing_cart_is_an_empty_200_not_an_error() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(42, Role::Customer);
    let (status, body) = get_request(&token, "/cart", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let cart: Value = serde_json::from_str(&body).expect("Body was not JSON");
    assert_eq!(cart["cart_id"], Value::Null);
    assert_eq!(cart["items"], json!([]));
}

#[actix_web::test]
async fn adding_an_unknown_product_is_a_404() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(42, Role::Customer);
    let body = json!({ "product_id": 404, "quantity": 1 });
    let (status, body) = post_request(&token, "/cart/add", &body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("product 404"));
}

#[actix_web::test]
async fn setting_quantity_below_one_is_rejected() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(42, Role::Customer);
    let body = json!({ "quantity": 0 });
    let (status, body) = put_request(&token, "/cart/update/1/2", &body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Quantity must be at least 1"));
}
