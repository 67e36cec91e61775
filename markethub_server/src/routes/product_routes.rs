use actix_web::{web, HttpResponse};
use log::*;
use markethub_engine::{
    db_types::{NewProduct, ProductUpdate, Role},
    traits::{CatalogManagement, ReviewManagement},
    CatalogApi,
    ReviewApi,
};
use serde_json::json;

use crate::{
    auth::Identity,
    data_objects::{JsonResponse, SearchQuery},
    errors::ServerError,
    route,
};

route!(list_products => Get "/products" impl CatalogManagement);
/// Vendors get their own catalog; customers and admins get everything. Unapproved products are
/// *not* filtered out; approval only matters on the admin dashboard.
pub async fn list_products<B: CatalogManagement>(
    identity: Identity,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let products = api.products_for_identity(identity.user_id(), identity.role()).await?;
    Ok(HttpResponse::Ok().json(products))
}

route!(search_products => Get "/products/search" impl CatalogManagement);
pub async fn search_products<B: CatalogManagement>(
    query: web::Query<SearchQuery>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ Product search for '{}'", query.query);
    let products = api.search(&query.query).await?;
    Ok(HttpResponse::Ok().json(products))
}

route!(product_details => Get "/products/details/{id}" impl CatalogManagement, ReviewManagement);
/// Product plus its reviews (with reviewer names), for the product detail page.
pub async fn product_details<B: CatalogManagement + ReviewManagement>(
    path: web::Path<i64>,
    catalog: web::Data<CatalogApi<B>>,
    reviews: web::Data<ReviewApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product_id = path.into_inner();
    let product = catalog.product(product_id).await?;
    let reviews = reviews.reviews_for_product(product_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "product": product, "reviews": reviews })))
}

route!(get_product => Get "/products/{id}" impl CatalogManagement);
pub async fn get_product<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product = api.product(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

route!(create_product => Post "/products" impl CatalogManagement where requires [Role::Vendor]);
pub async fn create_product<B: CatalogManagement>(
    identity: Identity,
    body: web::Json<NewProduct>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product = api.create_product(identity.user_id(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

route!(update_product => Put "/products/{id}" impl CatalogManagement where requires [Role::Vendor]);
pub async fn update_product<B: CatalogManagement>(
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<ProductUpdate>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product = api.update_own_product(identity.user_id(), path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

route!(delete_product => Delete "/products/{id}" impl CatalogManagement where requires [Role::Vendor]);
pub async fn delete_product<B: CatalogManagement>(
    identity: Identity,
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    api.delete_own_product(identity.user_id(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Product deleted successfully")))
}
