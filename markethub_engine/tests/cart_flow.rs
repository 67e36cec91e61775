mod support;

use markethub_engine::{db_types::Role, traits::CartApiError, CartApi};
use support::{new_db, seed_product, seed_user};

#[tokio::test]
async fn missing_cart_reads_back_empty() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let api = CartApi::new(db.clone());

    let cart = api.cart_for(customer.id).await.expect("Fetch failed");
    assert!(cart.cart_id.is_none());
    assert!(cart.items.is_empty());
}

#[tokio::test]
async fn adding_the_same_product_accumulates_quantity() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let api = CartApi::new(db.clone());

    api.add_item(customer.id, p, 2).await.expect("Add failed");
    let cart = api.add_item(customer.id, p, 3).await.expect("Add failed");
    assert_eq!(cart.quantity_of(p), Some(5));
    assert_eq!(cart.items.len(), 1);
}

#[tokio::test]
async fn add_rejects_unknown_products_and_bad_quantities() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let api = CartApi::new(db.clone());

    let err = api.add_item(customer.id, 404, 1).await.expect_err("Expected error");
    assert!(matches!(err, CartApiError::ProductNotFound(404)));
    let err = api.add_item(customer.id, p, 0).await.expect_err("Expected error");
    assert!(matches!(err, CartApiError::InvalidQuantity(0)));
}

#[tokio::test]
async fn decrease_removes_the_line_at_quantity_one() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let api = CartApi::new(db.clone());

    let cart = api.add_item(customer.id, p, 2).await.expect("Add failed");
    let cart_id = cart.cart_id.unwrap();

    let cart = api.decrease_item(cart_id, p).await.expect("Decrease failed");
    assert_eq!(cart.quantity_of(p), Some(1));
    // The line is removed outright, not left at zero.
    let cart = api.decrease_item(cart_id, p).await.expect("Decrease failed");
    assert_eq!(cart.quantity_of(p), None);
    assert!(cart.items.is_empty());

    let err = api.decrease_item(cart_id, p).await.expect_err("Expected error");
    assert!(matches!(err, CartApiError::ProductNotInCart(_)));
}

#[tokio::test]
async fn increase_and_set_quantity() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let api = CartApi::new(db.clone());

    let cart = api.add_item(customer.id, p, 1).await.expect("Add failed");
    let cart_id = cart.cart_id.unwrap();

    let cart = api.increase_item(cart_id, p).await.expect("Increase failed");
    assert_eq!(cart.quantity_of(p), Some(2));

    let cart = api.set_item_quantity(cart_id, p, 7).await.expect("Set failed");
    assert_eq!(cart.quantity_of(p), Some(7));

    let err = api.set_item_quantity(cart_id, p, 0).await.expect_err("Expected error");
    assert!(matches!(err, CartApiError::InvalidQuantity(0)));
    let err = api.set_item_quantity(9999, p, 2).await.expect_err("Expected error");
    assert!(matches!(err, CartApiError::CartNotFound));
}

#[tokio::test]
async fn remove_is_idempotent() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let q = seed_product(&db, vendor.id, "Kettle", 2000).await;
    let api = CartApi::new(db.clone());

    api.add_item(customer.id, p, 2).await.expect("Add failed");
    let cart = api.remove_item(customer.id, p).await.expect("Remove failed");
    assert!(cart.items.is_empty());
    // Removing a line that is not there is a no-op, not an error.
    let cart = api.remove_item(customer.id, q).await.expect("Remove failed");
    assert!(cart.items.is_empty());
}

#[tokio::test]
async fn clear_deletes_the_cart_row() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let api = CartApi::new(db.clone());

    api.add_item(customer.id, p, 2).await.expect("Add failed");
    api.clear(customer.id).await.expect("Clear failed");

    let cart = api.cart_for(customer.id).await.expect("Fetch failed");
    assert!(cart.cart_id.is_none());
    assert!(cart.items.is_empty());

    // Clearing again is fine.
    api.clear(customer.id).await.expect("Clear failed");
}

/// The final quantity equals adds minus decreases, floored at line removal.
#[tokio::test]
async fn quantity_bookkeeping_over_a_mixed_sequence() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let q = seed_product(&db, vendor.id, "Kettle", 2000).await;
    let api = CartApi::new(db.clone());

    let cart = api.add_item(customer.id, p, 3).await.unwrap();
    let cart_id = cart.cart_id.unwrap();
    api.add_item(customer.id, q, 1).await.unwrap();
    api.decrease_item(cart_id, p).await.unwrap();
    api.increase_item(cart_id, q).await.unwrap();
    api.add_item(customer.id, p, 2).await.unwrap();
    let cart = api.decrease_item(cart_id, q).await.unwrap();

    assert_eq!(cart.quantity_of(p), Some(4)); // 3 - 1 + 2
    assert_eq!(cart.quantity_of(q), Some(1)); // 1 + 1 - 1
}
