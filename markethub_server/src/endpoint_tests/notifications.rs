use actix_web::{http::StatusCode, web, web::ServiceConfig};
use markethub_engine::{db_types::Role, NotificationApi, NotificationApiError};
use serde_json::{json, Value};

use super::{
    helpers::{get_request, issue_token, post_request, put_request},
    mocks::MockBackend,
};
use crate::routes::{CreateNotificationRoute, MarkNotificationReadRoute, UnreadCountRoute};

fn configure(cfg: &mut ServiceConfig) {
    let mut backend = MockBackend::new();
    backend.expect_unread_count().returning(|_| Ok(3));
    backend
        .expect_mark_notification_read()
        .returning(|id| Err(NotificationApiError::NotificationNotFound(id)));
    let api = NotificationApi::new(backend);
    cfg.service(UnreadCountRoute::<MockBackend>::new())
        .service(MarkNotificationReadRoute::<MockBackend>::new())
        .service(CreateNotificationRoute::<MockBackend>::new())
        .app_data(web::Data::new(api));
}

#[actix_web::test]
async fn unread_count_feeds_the_badge() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(42, Role::Customer);
    let (status, body) = get_request(&token, "/notifications/unread", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&body).expect("Body was not JSON");
    assert_eq!(response["unread_count"], json!(3));
}

#[actix_web::test]
async fn marking_an_unknown_notification_is_a_404() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(42, Role::Customer);
    let (status, _) = put_request(&token, "/notifications/9999/read", &json!({}), configure)
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn creating_a_notification_requires_all_fields() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(42, Role::Customer);
    let body = json!({ "user_id": 7, "message": "", "type": "order" });
    let (status, body) = post_request(&token, "/notifications", &body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Missing required fields"));
}
