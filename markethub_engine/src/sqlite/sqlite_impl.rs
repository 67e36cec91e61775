//! `SqliteDatabase` is a concrete implementation of a MarketHub storage backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the
//! [`crate::traits`] module.
use std::fmt::Debug;

use serde_json::Value;
use sqlx::SqlitePool;

use super::db::{audit, carts, faqs, notifications, orders, products, reviews, users};
use crate::{
    db_types::{
        AuditLogEntry,
        Faq,
        NewProduct,
        NewReview,
        NewUser,
        Notification,
        Order,
        OrderStatus,
        Product,
        ProductUpdate,
        ResolvedOrder,
        Review,
        User,
        UserUpdate,
    },
    objects::{AdminOrderView, CartView, OrderDetail, ProductWithVendor, ReviewView, SalesReport},
    traits::{
        AuditApiError,
        AuditLogging,
        CartApiError,
        CartManagement,
        CatalogApiError,
        CatalogManagement,
        FaqApiError,
        FaqManagement,
        IdentityApiError,
        IdentityManagement,
        NotificationApiError,
        NotificationManagement,
        OrderApiError,
        OrderManagement,
        ReviewApiError,
        ReviewManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Connect to the database at `url` and bring the schema up to date.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = super::db::new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl IdentityManagement for SqliteDatabase {
    async fn create_user(&self, user: NewUser) -> Result<User, IdentityApiError> {
        let mut conn = self.pool.acquire().await?;
        users::insert_user(user, &mut conn).await
    }

    async fn fetch_user(&self, user_id: i64) -> Result<Option<User>, IdentityApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(users::fetch_user_by_id(user_id, &mut conn).await?)
    }

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, IdentityApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(users::fetch_user_by_email(email, &mut conn).await?)
    }

    async fn fetch_all_users(&self) -> Result<Vec<User>, IdentityApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(users::fetch_all_users(&mut conn).await?)
    }

    async fn update_profile(
        &self,
        user_id: i64,
        name: Option<String>,
        profile_details: Option<Value>,
    ) -> Result<User, IdentityApiError> {
        let mut conn = self.pool.acquire().await?;
        users::update_profile(user_id, name, profile_details, &mut conn).await
    }

    async fn update_user(&self, user_id: i64, update: UserUpdate) -> Result<User, IdentityApiError> {
        let mut conn = self.pool.acquire().await?;
        users::update_user(user_id, update, &mut conn).await
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), IdentityApiError> {
        let mut conn = self.pool.acquire().await?;
        users::delete_user(user_id, &mut conn).await
    }

    async fn mark_email_verified(&self, email: &str) -> Result<User, IdentityApiError> {
        let mut conn = self.pool.acquire().await?;
        users::mark_email_verified(email, &mut conn).await
    }

    async fn set_vendor_approval(&self, user_id: i64, approved: bool) -> Result<User, IdentityApiError> {
        let mut conn = self.pool.acquire().await?;
        users::set_vendor_approval(user_id, approved, &mut conn).await
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn insert_product(&self, vendor_id: i64, product: NewProduct) -> Result<Product, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        products::insert_product(vendor_id, product, &mut conn).await
    }

    async fn fetch_product(&self, product_id: i64) -> Result<Option<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::fetch_product(product_id, &mut conn).await?)
    }

    async fn fetch_all_products(&self) -> Result<Vec<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::fetch_all_products(&mut conn).await?)
    }

    async fn fetch_products_for_vendor(&self, vendor_id: i64) -> Result<Vec<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::fetch_products_for_vendor(vendor_id, &mut conn).await?)
    }

    async fn search_products(&self, query: &str, limit: i64) -> Result<Vec<Product>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::search_products(query, limit, &mut conn).await?)
    }

    async fn update_product(&self, product_id: i64, update: ProductUpdate) -> Result<Product, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        products::update_product(product_id, update, &mut conn).await
    }

    async fn delete_product(&self, product_id: i64) -> Result<(), CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        products::delete_product(product_id, &mut conn).await
    }

    async fn set_product_approval(&self, product_id: i64, approved: bool) -> Result<Product, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        products::set_product_approval(product_id, approved, &mut conn).await
    }

    async fn fetch_products_with_vendors(&self) -> Result<Vec<ProductWithVendor>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(products::fetch_products_with_vendors(&mut conn).await?)
    }
}

impl CartManagement for SqliteDatabase {
    async fn add_cart_item(&self, customer_id: i64, product_id: i64, quantity: i64) -> Result<CartView, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        carts::add_cart_item(customer_id, product_id, quantity, &mut conn).await
    }

    async fn fetch_cart(&self, customer_id: i64) -> Result<CartView, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        let cart = carts::fetch_cart_row(customer_id, &mut conn).await?;
        Ok(carts::cart_view(cart, &mut conn).await?)
    }

    async fn remove_cart_item(&self, customer_id: i64, product_id: i64) -> Result<CartView, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        carts::remove_cart_item(customer_id, product_id, &mut conn).await
    }

    async fn clear_cart(&self, customer_id: i64) -> Result<(), CartApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(carts::clear_cart(customer_id, &mut conn).await?)
    }

    async fn adjust_cart_item(&self, cart_id: i64, product_id: i64, delta: i64) -> Result<CartView, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        carts::adjust_cart_item(cart_id, product_id, delta, &mut conn).await
    }

    async fn set_cart_item_quantity(
        &self,
        cart_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<CartView, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        carts::set_cart_item_quantity(cart_id, product_id, quantity, &mut conn).await
    }
}

impl OrderManagement for SqliteDatabase {
    /// The order row, its line items and its vendor set are committed in a single transaction.
    async fn insert_order(&self, order: ResolvedOrder) -> Result<OrderDetail, OrderApiError> {
        let mut tx = self.pool.begin().await?;
        let detail = orders::insert_order(order, &mut *tx).await?;
        tx.commit().await?;
        Ok(detail)
    }

    async fn fetch_order(&self, order_id: i64) -> Result<Option<OrderDetail>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_order_detail(order_id, &mut conn).await?)
    }

    async fn fetch_orders_for_customer(&self, customer_id: i64) -> Result<Vec<OrderDetail>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_orders_for_customer(customer_id, &mut conn).await?)
    }

    async fn fetch_orders_for_vendor(&self, vendor_id: i64) -> Result<Vec<OrderDetail>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_orders_for_vendor(vendor_id, &mut conn).await?)
    }

    async fn fetch_all_orders(&self) -> Result<Vec<AdminOrderView>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_all_orders(&mut conn).await?)
    }

    async fn update_order_status(&self, order_id: i64, status: OrderStatus) -> Result<Order, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::update_order_status(order_id, status, &mut conn).await
    }

    async fn sales_report_for_vendor(&self, vendor_id: i64) -> Result<SalesReport, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::sales_report_for_vendor(vendor_id, &mut conn).await?)
    }
}

impl NotificationManagement for SqliteDatabase {
    async fn insert_notification(
        &self,
        user_id: i64,
        message: &str,
        kind: &str,
    ) -> Result<Notification, NotificationApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(notifications::insert_notification(user_id, message, kind, &mut conn).await?)
    }

    async fn fetch_notifications_for_user(&self, user_id: i64) -> Result<Vec<Notification>, NotificationApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(notifications::fetch_notifications_for_user(user_id, &mut conn).await?)
    }

    async fn mark_notification_read(&self, notification_id: i64) -> Result<Notification, NotificationApiError> {
        let mut conn = self.pool.acquire().await?;
        notifications::mark_notification_read(notification_id, &mut conn).await
    }

    async fn unread_count(&self, user_id: i64) -> Result<i64, NotificationApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(notifications::unread_count(user_id, &mut conn).await?)
    }
}

impl ReviewManagement for SqliteDatabase {
    async fn insert_review(&self, review: NewReview) -> Result<Review, ReviewApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(reviews::insert_review(review, &mut conn).await?)
    }

    async fn fetch_reviews_for_product(&self, product_id: i64) -> Result<Vec<ReviewView>, ReviewApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(reviews::fetch_reviews_for_product(product_id, &mut conn).await?)
    }

    async fn fetch_review(&self, review_id: i64) -> Result<Option<Review>, ReviewApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(reviews::fetch_review(review_id, &mut conn).await?)
    }

    async fn delete_review(&self, review_id: i64) -> Result<(), ReviewApiError> {
        let mut conn = self.pool.acquire().await?;
        reviews::delete_review(review_id, &mut conn).await
    }
}

impl FaqManagement for SqliteDatabase {
    async fn insert_faq(&self, question: &str, answer: &str, category: Option<&str>) -> Result<Faq, FaqApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(faqs::insert_faq(question, answer, category, &mut conn).await?)
    }

    async fn fetch_faqs(&self) -> Result<Vec<Faq>, FaqApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(faqs::fetch_faqs(&mut conn).await?)
    }

    async fn update_faq(
        &self,
        faq_id: i64,
        question: &str,
        answer: &str,
        category: Option<&str>,
    ) -> Result<Faq, FaqApiError> {
        let mut conn = self.pool.acquire().await?;
        faqs::update_faq(faq_id, question, answer, category, &mut conn).await
    }

    async fn delete_faq(&self, faq_id: i64) -> Result<(), FaqApiError> {
        let mut conn = self.pool.acquire().await?;
        faqs::delete_faq(faq_id, &mut conn).await
    }
}

impl AuditLogging for SqliteDatabase {
    async fn record_action(&self, user_id: i64, action: &str, details: &str) -> Result<(), AuditApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(audit::insert_entry(user_id, action, details, &mut conn).await?)
    }

    async fn fetch_audit_log(&self) -> Result<Vec<AuditLogEntry>, AuditApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(audit::fetch_all(&mut conn).await?)
    }
}
