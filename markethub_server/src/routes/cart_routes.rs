use actix_web::{web, HttpResponse};
use log::*;
use markethub_engine::{
    traits::{CartManagement, CatalogManagement},
    CartApi,
};

use crate::{
    auth::Identity,
    data_objects::{AddToCartRequest, JsonResponse, SetQuantityRequest},
    errors::ServerError,
    route,
};

route!(add_to_cart => Post "/cart/add" impl CartManagement, CatalogManagement);
pub async fn add_to_cart<B: CartManagement + CatalogManagement>(
    identity: Identity,
    body: web::Json<AddToCartRequest>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let cart = api.add_item(identity.user_id(), body.product_id, body.quantity).await?;
    Ok(HttpResponse::Ok().json(cart))
}

route!(get_cart => Get "/cart" impl CartManagement, CatalogManagement);
/// An empty cart and a missing cart row are the same thing; both come back 200 with no items.
pub async fn get_cart<B: CartManagement + CatalogManagement>(
    identity: Identity,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET cart for user {}", identity.user_id());
    let cart = api.cart_for(identity.user_id()).await?;
    Ok(HttpResponse::Ok().json(cart))
}

route!(update_cart_item => Put "/cart/update/{cart_id}/{product_id}" impl CartManagement, CatalogManagement);
pub async fn update_cart_item<B: CartManagement + CatalogManagement>(
    _identity: Identity,
    path: web::Path<(i64, i64)>,
    body: web::Json<SetQuantityRequest>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (cart_id, product_id) = path.into_inner();
    let cart = api.set_item_quantity(cart_id, product_id, body.quantity).await?;
    Ok(HttpResponse::Ok().json(cart))
}

route!(increase_cart_item => Put "/cart/increase/{cart_id}/{product_id}" impl CartManagement, CatalogManagement);
pub async fn increase_cart_item<B: CartManagement + CatalogManagement>(
    _identity: Identity,
    path: web::Path<(i64, i64)>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (cart_id, product_id) = path.into_inner();
    let cart = api.increase_item(cart_id, product_id).await?;
    Ok(HttpResponse::Ok().json(cart))
}

route!(decrease_cart_item => Put "/cart/decrease/{cart_id}/{product_id}" impl CartManagement, CatalogManagement);
pub async fn decrease_cart_item<B: CartManagement + CatalogManagement>(
    _identity: Identity,
    path: web::Path<(i64, i64)>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (cart_id, product_id) = path.into_inner();
    let cart = api.decrease_item(cart_id, product_id).await?;
    Ok(HttpResponse::Ok().json(cart))
}

route!(remove_cart_item => Delete "/cart/remove/{product_id}" impl CartManagement, CatalogManagement);
pub async fn remove_cart_item<B: CartManagement + CatalogManagement>(
    identity: Identity,
    path: web::Path<i64>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product_id = path.into_inner();
    let cart = api.remove_item(identity.user_id(), product_id).await?;
    Ok(HttpResponse::Ok().json(cart))
}

route!(clear_cart => Delete "/cart/clear" impl CartManagement, CatalogManagement);
pub async fn clear_cart<B: CartManagement + CatalogManagement>(
    identity: Identity,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    api.clear(identity.user_id()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Cart cleared successfully")))
}
