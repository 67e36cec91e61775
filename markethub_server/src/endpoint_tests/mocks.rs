use markethub_engine::{
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
use mockall::mock;
use serde_json::Value;

// One mock that implements every storage trait, so any engine API can be instantiated over it.
// Each test only sets expectations for the calls its route actually makes.
mock! {
    pub Backend {}

    impl IdentityManagement for Backend {
        async fn create_user(&self, user: NewUser) -> Result<User, IdentityApiError>;
        async fn fetch_user(&self, user_id: i64) -> Result<Option<User>, IdentityApiError>;
        async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, IdentityApiError>;
        async fn fetch_all_users(&self) -> Result<Vec<User>, IdentityApiError>;
        async fn update_profile(&self, user_id: i64, name: Option<String>, profile_details: Option<Value>) -> Result<User, IdentityApiError>;
        async fn update_user(&self, user_id: i64, update: UserUpdate) -> Result<User, IdentityApiError>;
        async fn delete_user(&self, user_id: i64) -> Result<(), IdentityApiError>;
        async fn mark_email_verified(&self, email: &str) -> Result<User, IdentityApiError>;
        async fn set_vendor_approval(&self, user_id: i64, approved: bool) -> Result<User, IdentityApiError>;
    }

    impl CatalogManagement for Backend {
        async fn insert_product(&self, vendor_id: i64, product: NewProduct) -> Result<Product, CatalogApiError>;
        async fn fetch_product(&self, product_id: i64) -> Result<Option<Product>, CatalogApiError>;
        async fn fetch_all_products(&self) -> Result<Vec<Product>, CatalogApiError>;
        async fn fetch_products_for_vendor(&self, vendor_id: i64) -> Result<Vec<Product>, CatalogApiError>;
        async fn search_products(&self, query: &str, limit: i64) -> Result<Vec<Product>, CatalogApiError>;
        async fn update_product(&self, product_id: i64, update: ProductUpdate) -> Result<Product, CatalogApiError>;
        async fn delete_product(&self, product_id: i64) -> Result<(), CatalogApiError>;
        async fn set_product_approval(&self, product_id: i64, approved: bool) -> Result<Product, CatalogApiError>;
        async fn fetch_products_with_vendors(&self) -> Result<Vec<ProductWithVendor>, CatalogApiError>;
    }

    impl CartManagement for Backend {
        async fn add_cart_item(&self, customer_id: i64, product_id: i64, quantity: i64) -> Result<CartView, CartApiError>;
        async fn fetch_cart(&self, customer_id: i64) -> Result<CartView, CartApiError>;
        async fn remove_cart_item(&self, customer_id: i64, product_id: i64) -> Result<CartView, CartApiError>;
        async fn clear_cart(&self, customer_id: i64) -> Result<(), CartApiError>;
        async fn adjust_cart_item(&self, cart_id: i64, product_id: i64, delta: i64) -> Result<CartView, CartApiError>;
        async fn set_cart_item_quantity(&self, cart_id: i64, product_id: i64, quantity: i64) -> Result<CartView, CartApiError>;
    }

    impl OrderManagement for Backend {
        async fn insert_order(&self, order: ResolvedOrder) -> Result<OrderDetail, OrderApiError>;
        async fn fetch_order(&self, order_id: i64) -> Result<Option<OrderDetail>, OrderApiError>;
        async fn fetch_orders_for_customer(&self, customer_id: i64) -> Result<Vec<OrderDetail>, OrderApiError>;
        async fn fetch_orders_for_vendor(&self, vendor_id: i64) -> Result<Vec<OrderDetail>, OrderApiError>;
        async fn fetch_all_orders(&self) -> Result<Vec<AdminOrderView>, OrderApiError>;
        async fn update_order_status(&self, order_id: i64, status: OrderStatus) -> Result<Order, OrderApiError>;
        async fn sales_report_for_vendor(&self, vendor_id: i64) -> Result<SalesReport, OrderApiError>;
    }

    impl NotificationManagement for Backend {
        async fn insert_notification(&self, user_id: i64, message: &str, kind: &str) -> Result<Notification, NotificationApiError>;
        async fn fetch_notifications_for_user(&self, user_id: i64) -> Result<Vec<Notification>, NotificationApiError>;
        async fn mark_notification_read(&self, notification_id: i64) -> Result<Notification, NotificationApiError>;
        async fn unread_count(&self, user_id: i64) -> Result<i64, NotificationApiError>;
    }

    impl ReviewManagement for Backend {
        async fn insert_review(&self, review: NewReview) -> Result<Review, ReviewApiError>;
        async fn fetch_reviews_for_product(&self, product_id: i64) -> Result<Vec<ReviewView>, ReviewApiError>;
        async fn fetch_review(&self, review_id: i64) -> Result<Option<Review>, ReviewApiError>;
        async fn delete_review(&self, review_id: i64) -> Result<(), ReviewApiError>;
    }

    impl FaqManagement for Backend {
        async fn insert_faq<'a>(&self, question: &str, answer: &str, category: Option<&'a str>) -> Result<Faq, FaqApiError>;
        async fn fetch_faqs(&self) -> Result<Vec<Faq>, FaqApiError>;
        async fn update_faq<'a>(&self, faq_id: i64, question: &str, answer: &str, category: Option<&'a str>) -> Result<Faq, FaqApiError>;
        async fn delete_faq(&self, faq_id: i64) -> Result<(), FaqApiError>;
    }

    impl AuditLogging for Backend {
        async fn record_action(&self, user_id: i64, action: &str, details: &str) -> Result<(), AuditApiError>;
        async fn fetch_audit_log(&self) -> Result<Vec<AuditLogEntry>, AuditApiError>;
    }
}
