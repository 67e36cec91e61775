use std::str::FromStr;

use actix_web::{web, HttpResponse};
use log::*;
use markethub_engine::{
    db_types::OrderStatus,
    traits::{CatalogManagement, NotificationManagement, OrderManagement},
    OrderFlowApi,
};

use crate::{
    auth::Identity,
    data_objects::{PlaceOrderRequest, StatusUpdateRequest},
    errors::ServerError,
    route,
};

route!(place_order => Post "/orders" impl OrderManagement, CatalogManagement, NotificationManagement);
/// Checkout. The order insert is transactional; the per-vendor notifications that follow are
/// best-effort (see the engine's order flow for the at-least-once contract).
pub async fn place_order<B: OrderManagement + CatalogManagement + NotificationManagement>(
    identity: Identity,
    body: web::Json<PlaceOrderRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let body = body.into_inner();
    let order = api.place_order(identity.user_id(), body.products, body.shipping_address).await?;
    info!("💻️ Order #{} placed by user {}", order.order.id, identity.user_id());
    Ok(HttpResponse::Created().json(order))
}

route!(my_orders => Get "/orders" impl OrderManagement, CatalogManagement, NotificationManagement);
/// Customers see the orders they placed; vendors see orders containing their products. Other
/// roles are denied; admins have their own unrestricted listing under `/admin`.
pub async fn my_orders<B: OrderManagement + CatalogManagement + NotificationManagement>(
    identity: Identity,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET orders for {} {}", identity.role(), identity.user_id());
    let orders = api.orders_for_identity(identity.user_id(), identity.role()).await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(order_by_id => Get "/orders/{id}" impl OrderManagement, CatalogManagement, NotificationManagement);
pub async fn order_by_id<B: OrderManagement + CatalogManagement + NotificationManagement>(
    _identity: Identity,
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order = api.fetch_order(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(update_order_status => Put "/orders/{id}/status" impl OrderManagement, CatalogManagement, NotificationManagement);
pub async fn update_order_status<B: OrderManagement + CatalogManagement + NotificationManagement>(
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<StatusUpdateRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let status = OrderStatus::from_str(&body.status).map_err(|e| ServerError::InvalidInput(e.to_string()))?;
    let order = api.update_status(identity.user_id(), identity.role(), path.into_inner(), status).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(cancel_order => Delete "/orders/{id}/cancel" impl OrderManagement, CatalogManagement, NotificationManagement);
pub async fn cancel_order<B: OrderManagement + CatalogManagement + NotificationManagement>(
    identity: Identity,
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order = api.cancel_order(identity.user_id(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(order))
}
