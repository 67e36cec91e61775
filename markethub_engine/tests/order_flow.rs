mod support;

use markethub_engine::{
    db_types::{DisputeResolution, OrderItem, OrderStatus, ProductUpdate, Role},
    traits::{CatalogManagement, NotificationManagement, OrderApiError},
    OrderFlowApi,
};
use mh_common::Price;
use support::{new_db, seed_product, seed_user, shipping};

#[tokio::test]
async fn empty_order_is_rejected_and_writes_nothing() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let api = OrderFlowApi::new(db.clone());

    let err = api.place_order(customer.id, vec![], shipping()).await.expect_err("Expected error");
    assert!(matches!(err, OrderApiError::EmptyOrder));

    let orders = api.orders_for_identity(customer.id, Role::Customer).await.unwrap();
    assert!(orders.is_empty());
    let inbox = db.fetch_notifications_for_user(vendor.id).await.unwrap();
    assert!(inbox.is_empty());
}

#[tokio::test]
async fn order_spanning_two_vendors_notifies_each_once() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let v1 = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let v2 = seed_user(&db, "Vlad", "vlad@example.com", Role::Vendor).await;
    let p = seed_product(&db, v1.id, "Teapot", 1000).await;
    let q = seed_product(&db, v2.id, "Cosy", 500).await;
    let api = OrderFlowApi::new(db.clone());

    let items = vec![OrderItem { product_id: p, quantity: 2 }, OrderItem { product_id: q, quantity: 1 }];
    let order = api.place_order(customer.id, items, shipping()).await.expect("Order failed");

    assert_eq!(order.order.total_amount, Price::from(2500));
    assert_eq!(order.order.status, OrderStatus::Pending);
    assert_eq!(order.vendor_ids.len(), 2);
    assert!(order.involves_vendor(v1.id) && order.involves_vendor(v2.id));

    for vendor in [&v1, &v2] {
        let inbox = db.fetch_notifications_for_user(vendor.id).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert!(inbox[0].message.contains(&order.order.id.to_string()));
        assert_eq!(inbox[0].kind, "order");
        assert!(!inbox[0].is_read);
    }
}

#[tokio::test]
async fn line_items_sharing_a_vendor_produce_one_notification() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let q = seed_product(&db, vendor.id, "Kettle", 2000).await;
    let api = OrderFlowApi::new(db.clone());

    let items = vec![OrderItem { product_id: p, quantity: 1 }, OrderItem { product_id: q, quantity: 3 }];
    let order = api.place_order(customer.id, items, shipping()).await.expect("Order failed");

    assert_eq!(order.vendor_ids, vec![vendor.id]);
    assert_eq!(order.order.total_amount, Price::from(7000));
    let inbox = db.fetch_notifications_for_user(vendor.id).await.unwrap();
    assert_eq!(inbox.len(), 1);
}

#[tokio::test]
async fn unresolvable_product_aborts_the_order() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let api = OrderFlowApi::new(db.clone());

    let items = vec![OrderItem { product_id: p, quantity: 1 }, OrderItem { product_id: 9999, quantity: 1 }];
    let err = api.place_order(customer.id, items, shipping()).await.expect_err("Expected error");
    assert!(matches!(err, OrderApiError::ProductNotFound(9999)));

    assert!(api.orders_for_identity(customer.id, Role::Customer).await.unwrap().is_empty());
    assert!(db.fetch_notifications_for_user(vendor.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn total_is_snapshotted_at_creation_time() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let api = OrderFlowApi::new(db.clone());

    let order = api
        .place_order(customer.id, vec![OrderItem { product_id: p, quantity: 2 }], shipping())
        .await
        .expect("Order failed");
    assert_eq!(order.order.total_amount, Price::from(2000));

    let update = ProductUpdate { price: Some(Price::from(9900)), ..Default::default() };
    db.update_product(p, update).await.expect("Price change failed");

    let fetched = api.fetch_order(order.order.id).await.expect("Fetch failed");
    assert_eq!(fetched.order.total_amount, Price::from(2000));
}

#[tokio::test]
async fn only_the_owner_may_cancel_and_only_while_pending() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let other = seed_user(&db, "Odo", "odo@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let api = OrderFlowApi::new(db.clone());

    let order = api
        .place_order(customer.id, vec![OrderItem { product_id: p, quantity: 1 }], shipping())
        .await
        .expect("Order failed");
    let order_id = order.order.id;

    let err = api.cancel_order(other.id, order_id).await.expect_err("Expected error");
    assert!(matches!(err, OrderApiError::NotYourOrder));

    api.update_status(vendor.id, Role::Vendor, order_id, OrderStatus::Shipped).await.expect("Status update failed");
    let err = api.cancel_order(customer.id, order_id).await.expect_err("Expected error");
    assert!(matches!(err, OrderApiError::NotCancellable(OrderStatus::Shipped)));
    assert_eq!(api.fetch_order(order_id).await.unwrap().order.status, OrderStatus::Shipped);
}

#[tokio::test]
async fn pending_order_can_be_cancelled_by_its_customer() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let api = OrderFlowApi::new(db.clone());

    let order = api
        .place_order(customer.id, vec![OrderItem { product_id: p, quantity: 1 }], shipping())
        .await
        .expect("Order failed");
    let cancelled = api.cancel_order(customer.id, order.order.id).await.expect("Cancel failed");
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn vendor_cannot_touch_an_order_without_their_products() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let v1 = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let v2 = seed_user(&db, "Vlad", "vlad@example.com", Role::Vendor).await;
    let p = seed_product(&db, v1.id, "Teapot", 1000).await;
    let api = OrderFlowApi::new(db.clone());

    let order = api
        .place_order(customer.id, vec![OrderItem { product_id: p, quantity: 1 }], shipping())
        .await
        .expect("Order failed");
    let err =
        api.update_status(v2.id, Role::Vendor, order.order.id, OrderStatus::Confirmed).await.expect_err("Expected error");
    assert!(matches!(err, OrderApiError::NotYourOrder));
    assert_eq!(api.fetch_order(order.order.id).await.unwrap().order.status, OrderStatus::Pending);
}

#[tokio::test]
async fn privileged_status_updates_are_not_transition_checked() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let admin = seed_user(&db, "Ada", "ada@example.com", Role::Admin).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let api = OrderFlowApi::new(db.clone());

    let order = api
        .place_order(customer.id, vec![OrderItem { product_id: p, quantity: 1 }], shipping())
        .await
        .expect("Order failed");
    let order_id = order.order.id;

    // Straight from Pending to Delivered, then back again. Both are allowed for privileged actors.
    let updated = api.update_status(vendor.id, Role::Vendor, order_id, OrderStatus::Delivered).await.unwrap();
    assert_eq!(updated.status, OrderStatus::Delivered);
    let updated = api.update_status(admin.id, Role::Admin, order_id, OrderStatus::Pending).await.unwrap();
    assert_eq!(updated.status, OrderStatus::Pending);

    // A plain customer has no path to the status update at all.
    let err = api.update_status(customer.id, Role::Customer, order_id, OrderStatus::Shipped).await.unwrap_err();
    assert!(matches!(err, OrderApiError::RoleNotAllowed(Role::Customer)));
}

#[tokio::test]
async fn listings_are_role_scoped() {
    let db = new_db().await;
    let c1 = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let c2 = seed_user(&db, "Odo", "odo@example.com", Role::Customer).await;
    let v1 = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let v2 = seed_user(&db, "Vlad", "vlad@example.com", Role::Vendor).await;
    let p1 = seed_product(&db, v1.id, "Teapot", 1000).await;
    let p2 = seed_product(&db, v2.id, "Cosy", 500).await;
    let api = OrderFlowApi::new(db.clone());

    api.place_order(c1.id, vec![OrderItem { product_id: p1, quantity: 1 }], shipping()).await.unwrap();
    api.place_order(c2.id, vec![OrderItem { product_id: p2, quantity: 1 }], shipping()).await.unwrap();

    assert_eq!(api.orders_for_identity(c1.id, Role::Customer).await.unwrap().len(), 1);
    assert_eq!(api.orders_for_identity(v2.id, Role::Vendor).await.unwrap().len(), 1);
    assert!(api.orders_for_identity(v1.id, Role::Customer).await.unwrap().is_empty());
    let err = api.orders_for_identity(c1.id, Role::Admin).await.unwrap_err();
    assert!(matches!(err, OrderApiError::RoleNotAllowed(Role::Admin)));
}

#[tokio::test]
async fn dispute_resolution_overwrites_the_status() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let api = OrderFlowApi::new(db.clone());

    let order = api
        .place_order(customer.id, vec![OrderItem { product_id: p, quantity: 1 }], shipping())
        .await
        .expect("Order failed");
    let resolved = api.resolve_dispute(order.order.id, DisputeResolution::Refunded).await.expect("Resolve failed");
    assert_eq!(resolved.status, OrderStatus::Refunded);

    let err = api.resolve_dispute(9999, DisputeResolution::Cancelled).await.expect_err("Expected error");
    assert!(matches!(err, OrderApiError::OrderNotFound(9999)));
}
