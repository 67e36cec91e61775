use actix_web::{http::StatusCode, web, web::ServiceConfig};
use markethub_engine::{db_types::Role, ModerationApi, OrderFlowApi};
use serde_json::{json, Value};

use super::{
    helpers::{get_request, issue_token, put_request, sample_user},
    mocks::MockBackend,
};
use crate::routes::{ApproveVendorRoute, ListUsersRoute, ResolveOrderRoute};

fn configure(cfg: &mut ServiceConfig) {
    let mut backend = MockBackend::new();
    backend
        .expect_fetch_all_users()
        .returning(|| Ok(vec![sample_user(1, Role::Admin), sample_user(2, Role::Vendor)]));
    backend.expect_set_vendor_approval().returning(|id, approved| {
        let mut user = sample_user(id, Role::Vendor);
        user.is_verified = approved;
        Ok(user)
    });
    let api = ModerationApi::new(backend);

    let mut order_backend = MockBackend::new();
    order_backend.expect_fetch_order().returning(|_| Ok(None));
    let order_api = OrderFlowApi::new(order_backend);

    cfg.service(ListUsersRoute::<MockBackend>::new())
        .service(ApproveVendorRoute::<MockBackend>::new())
        .service(ResolveOrderRoute::<MockBackend>::new())
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(order_api));
}

#[actix_web::test]
async fn admin_routes_reject_anonymous_callers() {
    let _ = env_logger::try_init().ok();
    let err = get_request("", "/admin/users", configure).await.expect_err("Expected error");
    assert!(err.contains("No token provided"));
}

#[actix_web::test]
async fn admin_routes_reject_other_roles() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(2, Role::Vendor);
    let err = get_request(&token, "/admin/users", configure).await.expect_err("Expected error");
    assert!(err.contains("admin role required"));
}

#[actix_web::test]
async fn user_listing_never_leaks_credential_hashes() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(1, Role::Admin);
    let (status, body) = get_request(&token, "/admin/users", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let users: Value = serde_json::from_str(&body).expect("Body was not JSON");
    assert_eq!(users.as_array().map(|a| a.len()), Some(2));
    assert!(!body.contains("password_hash"));
    assert!(!body.contains("argon2-hash"));
}

#[actix_web::test]
async fn vendor_approval_round_trip() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(1, Role::Admin);
    let (status, body) =
        put_request(&token, "/admin/users/2/approve", &json!({}), configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let user: Value = serde_json::from_str(&body).expect("Body was not JSON");
    assert_eq!(user["is_verified"], json!(true));
}

#[actix_web::test]
async fn dispute_resolution_only_accepts_the_narrow_set() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(1, Role::Admin);
    let body = json!({ "resolution": "Shipped" });
    let (status, body) =
        put_request(&token, "/admin/orders/5/resolve", &body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid resolution status"));
}
