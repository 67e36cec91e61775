use std::str::FromStr;

use actix_web::{web, HttpResponse};
use log::*;
use markethub_engine::{
    db_types::{DisputeResolution, NewUser, OrderStatus, Role, UserUpdate},
    traits::{AuditLogging, CatalogManagement, IdentityManagement, NotificationManagement, OrderManagement},
    ModerationApi,
    OrderFlowApi,
};

use crate::{
    auth::{hash_password, Identity},
    data_objects::{AdminCreateUserRequest, JsonResponse, ResolveDisputeRequest, StatusUpdateRequest},
    errors::ServerError,
    route,
};

//----------------------------------------------   Users  --------------------------------------------------------------
route!(list_users => Get "/admin/users" impl IdentityManagement, CatalogManagement, OrderManagement, AuditLogging where requires [Role::Admin]);
/// Credential hashes never serialize, so the listing is safe to hand to the dashboard as-is.
pub async fn list_users<B: IdentityManagement + CatalogManagement + OrderManagement + AuditLogging>(
    api: web::Data<ModerationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let users = api.all_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

route!(get_user => Get "/admin/users/{id}" impl IdentityManagement, CatalogManagement, OrderManagement, AuditLogging where requires [Role::Admin]);
pub async fn get_user<B: IdentityManagement + CatalogManagement + OrderManagement + AuditLogging>(
    path: web::Path<i64>,
    api: web::Data<ModerationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user = api.user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

route!(admin_update_user => Put "/admin/users/{id}" impl IdentityManagement, CatalogManagement, OrderManagement, AuditLogging where requires [Role::Admin]);
pub async fn admin_update_user<B: IdentityManagement + CatalogManagement + OrderManagement + AuditLogging>(
    path: web::Path<i64>,
    body: web::Json<UserUpdate>,
    api: web::Data<ModerationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user = api.update_user(path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

route!(admin_delete_user => Delete "/admin/users/{id}" impl IdentityManagement, CatalogManagement, OrderManagement, AuditLogging where requires [Role::Admin]);
pub async fn admin_delete_user<B: IdentityManagement + CatalogManagement + OrderManagement + AuditLogging>(
    path: web::Path<i64>,
    api: web::Data<ModerationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    api.delete_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("User deleted successfully")))
}

route!(admin_create_user => Post "/admin/users" impl IdentityManagement, CatalogManagement, OrderManagement, AuditLogging where requires [Role::Admin]);
/// Direct creation bypasses signup and email verification. Only admin accounts are born
/// verified; vendors and customers created this way still start pending and unverified.
pub async fn admin_create_user<B: IdentityManagement + CatalogManagement + OrderManagement + AuditLogging>(
    body: web::Json<AdminCreateUserRequest>,
    api: web::Data<ModerationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let body = body.into_inner();
    if body.name.is_empty() || body.email.is_empty() || body.password.is_empty() {
        return Err(ServerError::InvalidInput("All fields are required".to_string()));
    }
    let role = Role::from_str(&body.role).map_err(|e| ServerError::InvalidInput(e.to_string()))?;
    let password_hash = hash_password(&body.password)?;
    let user = api.create_user(NewUser::created_by_admin(body.name, body.email, password_hash, role)).await?;
    Ok(HttpResponse::Created().json(user))
}

route!(approve_vendor => Put "/admin/users/{id}/approve" impl IdentityManagement, CatalogManagement, OrderManagement, AuditLogging where requires [Role::Admin]);
pub async fn approve_vendor<B: IdentityManagement + CatalogManagement + OrderManagement + AuditLogging>(
    path: web::Path<i64>,
    api: web::Data<ModerationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user = api.approve_vendor(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

route!(reject_vendor => Put "/admin/users/{id}/reject" impl IdentityManagement, CatalogManagement, OrderManagement, AuditLogging where requires [Role::Admin]);
pub async fn reject_vendor<B: IdentityManagement + CatalogManagement + OrderManagement + AuditLogging>(
    path: web::Path<i64>,
    api: web::Data<ModerationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user = api.reject_vendor(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

//---------------------------------------------  Products  -------------------------------------------------------------
route!(admin_products => Get "/admin/products" impl IdentityManagement, CatalogManagement, OrderManagement, AuditLogging where requires [Role::Admin]);
pub async fn admin_products<B: IdentityManagement + CatalogManagement + OrderManagement + AuditLogging>(
    api: web::Data<ModerationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let products = api.all_products().await?;
    Ok(HttpResponse::Ok().json(products))
}

route!(approve_product => Put "/admin/products/{id}/approve" impl IdentityManagement, CatalogManagement, OrderManagement, AuditLogging where requires [Role::Admin]);
pub async fn approve_product<B: IdentityManagement + CatalogManagement + OrderManagement + AuditLogging>(
    path: web::Path<i64>,
    api: web::Data<ModerationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    api.approve_product(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Product approved successfully")))
}

route!(reject_product => Put "/admin/products/{id}/reject" impl IdentityManagement, CatalogManagement, OrderManagement, AuditLogging where requires [Role::Admin]);
pub async fn reject_product<B: IdentityManagement + CatalogManagement + OrderManagement + AuditLogging>(
    path: web::Path<i64>,
    api: web::Data<ModerationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    api.reject_product(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Product rejected successfully")))
}

//----------------------------------------------  Orders  --------------------------------------------------------------
route!(admin_orders => Get "/admin/orders" impl IdentityManagement, CatalogManagement, OrderManagement, AuditLogging where requires [Role::Admin]);
pub async fn admin_orders<B: IdentityManagement + CatalogManagement + OrderManagement + AuditLogging>(
    api: web::Data<ModerationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let orders = api.all_orders().await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(admin_order_status => Put "/admin/orders/{id}/status" impl OrderManagement, CatalogManagement, NotificationManagement where requires [Role::Admin]);
pub async fn admin_order_status<B: OrderManagement + CatalogManagement + NotificationManagement>(
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<StatusUpdateRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let status = OrderStatus::from_str(&body.status).map_err(|e| ServerError::InvalidInput(e.to_string()))?;
    let order = api.update_status(identity.user_id(), identity.role(), path.into_inner(), status).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(resolve_order => Put "/admin/orders/{id}/resolve" impl OrderManagement, CatalogManagement, NotificationManagement where requires [Role::Admin]);
pub async fn resolve_order<B: OrderManagement + CatalogManagement + NotificationManagement>(
    path: web::Path<i64>,
    body: web::Json<ResolveDisputeRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let resolution =
        DisputeResolution::from_str(&body.resolution).map_err(|e| ServerError::InvalidInput(e.to_string()))?;
    let order = api.resolve_dispute(path.into_inner(), resolution).await?;
    info!("💻️ Order #{} resolved as {}", order.id, order.status);
    Ok(HttpResponse::Ok().json(order))
}

//---------------------------------------------  Audit log  ------------------------------------------------------------
route!(audit_logs => Get "/audit-logs" impl IdentityManagement, CatalogManagement, OrderManagement, AuditLogging where requires [Role::Admin]);
pub async fn audit_logs<B: IdentityManagement + CatalogManagement + OrderManagement + AuditLogging>(
    api: web::Data<ModerationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let logs = api.audit_log().await?;
    Ok(HttpResponse::Ok().json(logs))
}
