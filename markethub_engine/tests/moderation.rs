mod support;

use markethub_engine::{
    db_types::{NewReview, NewUser, OrderItem, Role, UserUpdate},
    traits::{IdentityApiError, NotificationApiError, ReviewApiError},
    FaqApi,
    IdentityApi,
    ModerationApi,
    NotificationApi,
    OrderFlowApi,
    ReviewApi,
};
use mh_common::Price;
use support::{new_db, seed_product, seed_user, shipping};

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let db = new_db().await;
    let api = IdentityApi::new(db.clone());
    let user = NewUser::signup("Cass".into(), "cass@example.com".into(), "hash".into(), Role::Customer);
    api.signup(user.clone()).await.expect("Signup failed");
    let err = api.signup(user).await.expect_err("Expected error");
    assert!(matches!(err, IdentityApiError::EmailInUse(_)));
}

#[tokio::test]
async fn signup_and_verification_are_audited() {
    let db = new_db().await;
    let api = IdentityApi::new(db.clone());
    let moderation = ModerationApi::new(db.clone());

    let user = api
        .signup(NewUser::signup("Cass".into(), "cass@example.com".into(), "hash".into(), Role::Customer))
        .await
        .expect("Signup failed");
    assert!(!user.is_verified);

    let verified = api.verify_email("cass@example.com").await.expect("Verify failed");
    assert!(verified.is_verified);
    let err = api.verify_email("cass@example.com").await.expect_err("Expected error");
    assert!(matches!(err, IdentityApiError::AlreadyVerified(_)));

    let log = moderation.audit_log().await.expect("Audit fetch failed");
    assert_eq!(log.len(), 2);
    // Newest first.
    assert_eq!(log[0].action, "Email Verified");
    assert_eq!(log[1].action, "User Signup");
}

#[tokio::test]
async fn vendor_approval_flips_verification_and_status() {
    let db = new_db().await;
    let moderation = ModerationApi::new(db.clone());
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;

    let approved = moderation.approve_vendor(vendor.id).await.expect("Approve failed");
    assert!(approved.is_verified);
    assert_eq!(approved.status.to_string(), "approved");

    let rejected = moderation.reject_vendor(vendor.id).await.expect("Reject failed");
    assert!(!rejected.is_verified);
    assert_eq!(rejected.status.to_string(), "rejected");

    let err = moderation.approve_vendor(customer.id).await.expect_err("Expected error");
    assert!(matches!(err, IdentityApiError::NotAVendor(_)));
}

#[tokio::test]
async fn admin_created_accounts_start_in_the_right_state() {
    let db = new_db().await;
    let moderation = ModerationApi::new(db.clone());

    let admin = moderation
        .create_user(NewUser::created_by_admin("Ada".into(), "ada@example.com".into(), "hash".into(), Role::Admin))
        .await
        .expect("Create failed");
    assert!(admin.is_verified);
    assert_eq!(admin.status.to_string(), "approved");

    let vendor = moderation
        .create_user(NewUser::created_by_admin("Vera".into(), "vera@example.com".into(), "hash".into(), Role::Vendor))
        .await
        .expect("Create failed");
    assert!(!vendor.is_verified);
    assert_eq!(vendor.status.to_string(), "pending");
}

#[tokio::test]
async fn user_update_and_delete() {
    let db = new_db().await;
    let moderation = ModerationApi::new(db.clone());
    let user = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;

    let update = UserUpdate { name: Some("Cassandra".into()), is_verified: Some(true), ..Default::default() };
    let updated = moderation.update_user(user.id, update).await.expect("Update failed");
    assert_eq!(updated.name, "Cassandra");
    assert!(updated.is_verified);

    moderation.delete_user(user.id).await.expect("Delete failed");
    let err = moderation.user(user.id).await.expect_err("Expected error");
    assert!(matches!(err, IdentityApiError::UserNotFound(_)));
}

#[tokio::test]
async fn product_rejection_clears_the_approval_flag() {
    let db = new_db().await;
    let moderation = ModerationApi::new(db.clone());
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;

    moderation.approve_product(p).await.expect("Approve failed");
    let listing = moderation.all_products().await.expect("Listing failed");
    assert!(listing.iter().find(|v| v.product.id == p).unwrap().product.approved);

    moderation.reject_product(p).await.expect("Reject failed");
    let listing = moderation.all_products().await.expect("Listing failed");
    let entry = listing.iter().find(|v| v.product.id == p).unwrap();
    assert!(!entry.product.approved);
    assert_eq!(entry.vendor_email, "vera@example.com");
}

#[tokio::test]
async fn admin_order_listing_carries_context() {
    let db = new_db().await;
    let moderation = ModerationApi::new(db.clone());
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;
    let flow = OrderFlowApi::new(db.clone());
    flow.place_order(customer.id, vec![OrderItem { product_id: p, quantity: 2 }], shipping()).await.unwrap();

    let orders = moderation.all_orders().await.expect("Listing failed");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].customer_email, "cass@example.com");
    assert_eq!(orders[0].items.len(), 1);
    assert_eq!(orders[0].items[0].name, "Teapot");
    assert_eq!(orders[0].items[0].price, Price::from(1000));
}

#[tokio::test]
async fn mark_read_is_idempotent() {
    let db = new_db().await;
    let api = NotificationApi::new(db.clone());
    let user = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;

    let n = api.create(user.id, "hello", "system").await.expect("Create failed");
    assert_eq!(api.unread_count(user.id).await.unwrap(), 1);

    let first = api.mark_read(n.id).await.expect("Mark failed");
    assert!(first.is_read);
    let second = api.mark_read(n.id).await.expect("Mark failed");
    assert!(second.is_read);
    assert_eq!(api.unread_count(user.id).await.unwrap(), 0);

    let err = api.mark_read(9999).await.expect_err("Expected error");
    assert!(matches!(err, NotificationApiError::NotificationNotFound(9999)));
}

#[tokio::test]
async fn reviews_are_author_deletable_only() {
    let db = new_db().await;
    let api = ReviewApi::new(db.clone());
    let author = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let other = seed_user(&db, "Odo", "odo@example.com", Role::Customer).await;
    let vendor = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let p = seed_product(&db, vendor.id, "Teapot", 1000).await;

    let review = api
        .add_review(NewReview { product_id: p, customer_id: author.id, rating: 5, comment: "lovely".into() })
        .await
        .expect("Review failed");

    let listed = api.reviews_for_product(p).await.expect("Listing failed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].reviewer_name, "Cass");

    let err = api.delete_own_review(other.id, review.id).await.expect_err("Expected error");
    assert!(matches!(err, ReviewApiError::NotYourReview));
    api.delete_own_review(author.id, review.id).await.expect("Delete failed");
    assert!(api.reviews_for_product(p).await.unwrap().is_empty());
}

#[tokio::test]
async fn faq_crud_roundtrip() {
    let db = new_db().await;
    let api = FaqApi::new(db.clone());

    let faq = api.create("How do refunds work?", "Via support.", Some("orders")).await.expect("Create failed");
    let all = api.all().await.expect("Listing failed");
    assert_eq!(all.len(), 1);

    let updated = api.update(faq.id, "How do refunds work?", "Ask an admin.", None).await.expect("Update failed");
    assert_eq!(updated.answer, "Ask an admin.");
    assert!(updated.category.is_none());

    api.delete(faq.id).await.expect("Delete failed");
    assert!(api.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn sales_report_counts_only_the_vendors_own_lines() {
    let db = new_db().await;
    let customer = seed_user(&db, "Cass", "cass@example.com", Role::Customer).await;
    let v1 = seed_user(&db, "Vera", "vera@example.com", Role::Vendor).await;
    let v2 = seed_user(&db, "Vlad", "vlad@example.com", Role::Vendor).await;
    let p = seed_product(&db, v1.id, "Teapot", 1000).await;
    let q = seed_product(&db, v2.id, "Cosy", 500).await;
    let flow = OrderFlowApi::new(db.clone());

    let items = vec![OrderItem { product_id: p, quantity: 2 }, OrderItem { product_id: q, quantity: 5 }];
    flow.place_order(customer.id, items, shipping()).await.expect("Order failed");

    let report = flow.sales_report(v1.id).await.expect("Report failed");
    assert_eq!(report.total_sales, 2);
    assert_eq!(report.total_revenue, Price::from(2000));
    assert_eq!(report.sales_by_month.len(), 1);
    assert_eq!(report.sales_by_month[0].units, 2);

    let report = flow.sales_report(v2.id).await.expect("Report failed");
    assert_eq!(report.total_sales, 5);
    assert_eq!(report.total_revenue, Price::from(2500));

    // A vendor with no sales gets an empty, zeroed report.
    let report = flow.sales_report(9999).await.expect("Report failed");
    assert_eq!(report.total_sales, 0);
    assert!(report.sales_by_month.is_empty());
}
