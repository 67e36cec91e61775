use std::fmt::Debug;

use log::*;
use mh_common::Price;

use crate::{
    db_types::{DisputeResolution, Order, OrderItem, OrderStatus, ResolvedOrder, Role, ShippingAddress},
    objects::{OrderDetail, SalesReport},
    traits::{CatalogManagement, NotificationManagement, OrderApiError, OrderManagement},
};

/// `OrderFlowApi` is the primary API for the order placement and fulfilment workflow: checkout,
/// role-scoped listings, status transitions and dispute resolution.
pub struct OrderFlowApi<B> {
    db: B,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement + CatalogManagement + NotificationManagement
{
    /// Place an order from a snapshot of (product, quantity) pairs.
    ///
    /// This is an explicit two-phase operation:
    /// 1. Resolve every line item against the catalog, accumulate the total and the
    ///    de-duplicated vendor set, and persist the order in a single transaction.
    /// 2. Write one notification per involved vendor.
    ///
    /// Phase 2 is best-effort: a failed notification insert is logged and skipped, and never
    /// rolls back the order. The contract is at-least-once: the order is durable even if no
    /// vendor hears about it.
    pub async fn place_order(
        &self,
        customer_id: i64,
        items: Vec<OrderItem>,
        shipping_address: ShippingAddress,
    ) -> Result<OrderDetail, OrderApiError> {
        if items.is_empty() {
            return Err(OrderApiError::EmptyOrder);
        }
        let mut total_amount = Price::default();
        let mut vendor_ids: Vec<i64> = Vec::new();
        for item in &items {
            let product = self
                .db
                .fetch_product(item.product_id)
                .await
                .map_err(|e| OrderApiError::DatabaseError(e.to_string()))?
                .ok_or(OrderApiError::ProductNotFound(item.product_id))?;
            total_amount = total_amount + product.price * item.quantity;
            if !vendor_ids.contains(&product.vendor_id) {
                vendor_ids.push(product.vendor_id);
            }
        }
        let resolved = ResolvedOrder { customer_id, items, vendor_ids, total_amount, shipping_address };
        let order = self.db.insert_order(resolved).await?;
        debug!("🛒️ Order #{} placed by customer {customer_id} for {total_amount}", order.order.id);
        self.notify_vendors(&order).await;
        Ok(order)
    }

    /// Phase 2 of checkout. Failures are logged and swallowed; see [`Self::place_order`].
    async fn notify_vendors(&self, order: &OrderDetail) {
        let message = format!("New Order Received! Order ID: {}", order.order.id);
        for vendor_id in &order.vendor_ids {
            if let Err(e) = self.db.insert_notification(*vendor_id, &message, "order").await {
                error!("🛒️ Could not notify vendor {vendor_id} about order #{}. {e}", order.order.id);
            }
        }
    }

    /// Role-scoped order listing: customers see the orders they placed, vendors see the orders
    /// containing their products. Admins use the unrestricted moderation listing instead.
    pub async fn orders_for_identity(&self, user_id: i64, role: Role) -> Result<Vec<OrderDetail>, OrderApiError> {
        match role {
            Role::Customer => self.db.fetch_orders_for_customer(user_id).await,
            Role::Vendor => self.db.fetch_orders_for_vendor(user_id).await,
            other => Err(OrderApiError::RoleNotAllowed(other)),
        }
    }

    pub async fn fetch_order(&self, order_id: i64) -> Result<OrderDetail, OrderApiError> {
        self.db.fetch_order(order_id).await?.ok_or(OrderApiError::OrderNotFound(order_id))
    }

    /// Overwrite an order's status. Vendors may only touch orders whose vendor set contains
    /// them; admins may touch any order. No transition graph is enforced for either, so an order
    /// can go straight from `Pending` to `Delivered`.
    pub async fn update_status(
        &self,
        actor_id: i64,
        role: Role,
        order_id: i64,
        new_status: OrderStatus,
    ) -> Result<Order, OrderApiError> {
        let order = self.fetch_order(order_id).await?;
        match role {
            Role::Admin => {},
            Role::Vendor if order.involves_vendor(actor_id) => {},
            Role::Vendor => return Err(OrderApiError::NotYourOrder),
            other => return Err(OrderApiError::RoleNotAllowed(other)),
        }
        let updated = self.db.update_order_status(order_id, new_status).await?;
        info!("🛒️ Order #{order_id} status set to {new_status} by {role} {actor_id}");
        Ok(updated)
    }

    /// Customer-initiated cancellation. Only the order's owner may cancel, and only while the
    /// order is still `Pending`.
    pub async fn cancel_order(&self, customer_id: i64, order_id: i64) -> Result<Order, OrderApiError> {
        let order = self.fetch_order(order_id).await?;
        if order.order.customer_id != customer_id {
            return Err(OrderApiError::NotYourOrder);
        }
        if order.order.status != OrderStatus::Pending {
            return Err(OrderApiError::NotCancellable(order.order.status));
        }
        let updated = self.db.update_order_status(order_id, OrderStatus::Cancelled).await?;
        info!("🛒️ Order #{order_id} cancelled by customer {customer_id}");
        Ok(updated)
    }

    /// Admin dispute resolution: a status overwrite gated to the narrower resolution set.
    pub async fn resolve_dispute(&self, order_id: i64, resolution: DisputeResolution) -> Result<Order, OrderApiError> {
        let _ = self.fetch_order(order_id).await?;
        let updated = self.db.update_order_status(order_id, resolution.as_status()).await?;
        info!("🛒️ Order #{order_id} dispute resolved as {}", resolution.as_status());
        Ok(updated)
    }

    pub async fn sales_report(&self, vendor_id: i64) -> Result<SalesReport, OrderApiError> {
        self.db.sales_report_for_vendor(vendor_id).await
    }
}
