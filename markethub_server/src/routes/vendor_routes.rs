use actix_web::{web, HttpResponse};
use log::*;
use markethub_engine::{
    traits::{CatalogManagement, NotificationManagement, OrderManagement},
    OrderFlowApi,
};

use crate::{auth::Identity, errors::ServerError, route};

route!(sales_report => Get "/vendors/sales-report/{vendor_id}" impl OrderManagement, CatalogManagement, NotificationManagement);
/// Monthly sales aggregation for a vendor. The observed system left this endpoint wide open;
/// here it is gated to the vendor themselves or an admin.
pub async fn sales_report<B: OrderManagement + CatalogManagement + NotificationManagement>(
    identity: Identity,
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let vendor_id = path.into_inner();
    identity.require_self_or_admin(vendor_id)?;
    debug!("💻️ Sales report for vendor {vendor_id}");
    let report = api.sales_report(vendor_id).await?;
    Ok(HttpResponse::Ok().json(report))
}
