use std::{str::FromStr, sync::Arc};

use actix_web::{web, HttpResponse};
use log::*;
use markethub_engine::{
    db_types::{NewUser, Role},
    traits::{AuditLogging, IdentityManagement},
    IdentityApi,
};

use crate::{
    auth::{hash_password, verify_password, Identity, TokenIssuer},
    data_objects::{
        JsonResponse,
        LoginRequest,
        LoginResponse,
        ProfileUpdateRequest,
        SignupRequest,
        VerifyEmailQuery,
    },
    errors::{AuthError, ServerError},
    mailer::VerificationMailer,
    route,
    server::BaseUrl,
};

route!(signup => Post "/auth/signup" impl IdentityManagement, AuditLogging);
/// Create an unverified account and send the verification link.
///
/// The link carries a short-lived token; until it is followed, login is refused. Mail delivery
/// is best-effort; the account exists either way, matching the observed system.
pub async fn signup<B: IdentityManagement + AuditLogging>(
    body: web::Json<SignupRequest>,
    api: web::Data<IdentityApi<B>>,
    signer: web::Data<TokenIssuer>,
    mailer: web::Data<Arc<dyn VerificationMailer>>,
    base_url: web::Data<BaseUrl>,
) -> Result<HttpResponse, ServerError> {
    let body = body.into_inner();
    let role = match body.role.as_deref() {
        None => Role::Customer,
        Some(r) => Role::from_str(r).map_err(|e| ServerError::InvalidInput(e.to_string()))?,
    };
    let password_hash = hash_password(&body.password)?;
    let mut user = NewUser::signup(body.name, body.email.clone(), password_hash, role);
    if let Some(profile) = body.profile_details {
        user = user.with_profile(profile);
    }
    let user = api.signup(user).await?;
    let token = signer.issue_email_token(&user.email)?;
    let link = format!("{}/api/auth/verify-email?token={token}", base_url.0);
    mailer.send_verification(&user.email, &link);
    Ok(HttpResponse::Created().json(JsonResponse::success("User registered! Check your email for verification link.")))
}

route!(verify_email => Get "/auth/verify-email" impl IdentityManagement, AuditLogging);
pub async fn verify_email<B: IdentityManagement + AuditLogging>(
    query: web::Query<VerifyEmailQuery>,
    api: web::Data<IdentityApi<B>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let claims = signer
        .decode_email_token(&query.token)
        .map_err(|e| ServerError::InvalidInput(format!("Invalid or missing token. {e}")))?;
    let user = api.verify_email(&claims.email).await?;
    debug!("💻️ Email verified for {}", user.email);
    Ok(HttpResponse::Ok().json(JsonResponse::success("Email verified! You can log in now.")))
}

route!(login => Post "/auth/login" impl IdentityManagement, AuditLogging);
/// Issue a bearer token on a verified credential match. All credential failures collapse into
/// the same response, so the endpoint doesn't leak which emails exist.
pub async fn login<B: IdentityManagement + AuditLogging>(
    body: web::Json<LoginRequest>,
    api: web::Data<IdentityApi<B>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let body = body.into_inner();
    let user = api.user_by_email(&body.email).await?.ok_or(AuthError::InvalidCredentials)?;
    if !user.is_verified {
        return Err(AuthError::AccountNotVerified.into());
    }
    if !verify_password(&user.password_hash, &body.password) {
        debug!("💻️ Failed login attempt for {}", user.email);
        return Err(AuthError::InvalidCredentials.into());
    }
    let token = signer.issue_access_token(user.id, user.role)?;
    api.record_login(&user).await;
    Ok(HttpResponse::Ok().json(LoginResponse { token, user }))
}

route!(my_profile => Get "/auth/profile" impl IdentityManagement, AuditLogging);
pub async fn my_profile<B: IdentityManagement + AuditLogging>(
    identity: Identity,
    api: web::Data<IdentityApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET profile for user {}", identity.user_id());
    let user = api.user_by_id(identity.user_id()).await?;
    Ok(HttpResponse::Ok().json(user))
}

route!(update_profile => Put "/auth/profile" impl IdentityManagement, AuditLogging);
pub async fn update_profile<B: IdentityManagement + AuditLogging>(
    identity: Identity,
    body: web::Json<ProfileUpdateRequest>,
    api: web::Data<IdentityApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let body = body.into_inner();
    let user = api.update_profile(identity.user_id(), body.name, body.profile_details).await?;
    Ok(HttpResponse::Ok().json(user))
}
