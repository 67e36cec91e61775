use std::sync::Arc;

use actix_web::{http::StatusCode, web, web::ServiceConfig};
use markethub_engine::{db_types::Role, IdentityApi};
use serde_json::{json, Value};

use super::{
    helpers::{get_auth_config, get_request, issue_token, post_request, sample_user},
    mocks::MockBackend,
};
use crate::{
    auth::{hash_password, TokenIssuer},
    mailer::{LogMailer, VerificationMailer},
    routes::{LoginRoute, MyProfileRoute, SignupRoute},
    server::BaseUrl,
};

const GOOD_PASSWORD: &str = "correct horse battery staple";

fn configure(cfg: &mut ServiceConfig) {
    let mut backend = MockBackend::new();
    backend.expect_fetch_user_by_email().returning(|email| match email {
        "cass@example.com" => {
            let mut user = sample_user(42, Role::Customer);
            user.email = email.to_string();
            user.password_hash = hash_password(GOOD_PASSWORD).unwrap();
            Ok(Some(user))
        },
        "unverified@example.com" => {
            let mut user = sample_user(43, Role::Customer);
            user.email = email.to_string();
            user.is_verified = false;
            user.password_hash = hash_password(GOOD_PASSWORD).unwrap();
            Ok(Some(user))
        },
        _ => Ok(None),
    });
    backend.expect_fetch_user().returning(|id| Ok(Some(sample_user(id, Role::Customer))));
    backend.expect_create_user().returning(|new_user| {
        let mut user = sample_user(50, new_user.role);
        user.email = new_user.email;
        user.is_verified = false;
        Ok(user)
    });
    backend.expect_record_action().returning(|_, _, _| Ok(()));
    let api = IdentityApi::new(backend);
    let mailer: Arc<dyn VerificationMailer> = Arc::new(LogMailer);
    cfg.service(LoginRoute::<MockBackend>::new())
        .service(SignupRoute::<MockBackend>::new())
        .service(MyProfileRoute::<MockBackend>::new())
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(TokenIssuer::new(&get_auth_config())))
        .app_data(web::Data::new(mailer))
        .app_data(web::Data::new(BaseUrl("http://localhost:5000".to_string())));
}

#[actix_web::test]
async fn profile_requires_a_token() {
    let _ = env_logger::try_init().ok();
    let (status, _) = get_request("", "/auth/profile", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn profile_omits_the_credential_hash() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(42, Role::Customer);
    let (status, body) = get_request(&token, "/auth/profile", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("password_hash"));
}

#[actix_web::test]
async fn login_with_wrong_password() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "email": "cass@example.com", "password": "hunter2" });
    let (status, body) = post_request("", "/auth/login", &body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Invalid email or password"));
}

#[actix_web::test]
async fn login_with_unknown_email_reads_the_same_as_a_bad_password() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "email": "nobody@example.com", "password": "hunter2" });
    let (status, body) = post_request("", "/auth/login", &body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Invalid email or password"));
}

#[actix_web::test]
async fn login_requires_a_verified_account() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "email": "unverified@example.com", "password": GOOD_PASSWORD });
    let (status, body) = post_request("", "/auth/login", &body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.contains("verify your email"));
}

#[actix_web::test]
async fn login_issues_a_usable_token() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "email": "cass@example.com", "password": GOOD_PASSWORD });
    let (status, body) = post_request("", "/auth/login", &body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&body).expect("Body was not JSON");
    let token = response["token"].as_str().expect("No token in response");

    // The token from the login response authenticates the profile route.
    let (status, _) = get_request(token, "/auth/profile", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn signup_rejects_unknown_roles() {
    let _ = env_logger::try_init().ok();
    let body = json!({
        "name": "Mallory",
        "email": "mallory@example.com",
        "password": "pw",
        "role": "superuser"
    });
    let (status, body) = post_request("", "/auth/signup", &body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid role"));
}

#[actix_web::test]
async fn signup_creates_an_unverified_account() {
    let _ = env_logger::try_init().ok();
    let body = json!({
        "name": "Cass",
        "email": "new@example.com",
        "password": "pw"
    });
    let (status, body) = post_request("", "/auth/signup", &body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.contains("Check your email"));
}
