//! MarketHub Engine
//!
//! The engine holds everything the marketplace server needs that isn't HTTP: the data types,
//! the storage traits, the SQLite backend, and the business APIs that sit between the two.
//!
//! The library is divided into three main sections:
//! 1. Database management ([`mod@sqlite`]). SQLite is the only supported backend. You should
//!    never need to reach for the database directly. Use the public API instead. The exception
//!    is the row types in [`db_types`], which are public.
//! 2. The storage contracts ([`traits`]). A backend implements these to power the marketplace;
//!    the server's endpoint tests implement them with mocks.
//! 3. The business APIs ([`mod@api`]): thin generic wrappers holding the actual rules, like order
//!    placement with its best-effort vendor notification fan-out, cart quantity policy,
//!    role-scoped listings, and the admin moderation surface.

pub mod db_types;

mod api;
mod sqlite;
pub mod traits;

pub use api::{
    cart_api::CartApi,
    catalog_api::{CatalogApi, SEARCH_RESULT_LIMIT},
    faq_api::FaqApi,
    identity_api::IdentityApi,
    moderation_api::ModerationApi,
    notification_api::NotificationApi,
    objects,
    order_flow_api::OrderFlowApi,
    review_api::ReviewApi,
};
pub use sqlite::SqliteDatabase;
pub use traits::{
    AuditApiError,
    CartApiError,
    CatalogApiError,
    FaqApiError,
    IdentityApiError,
    NotificationApiError,
    OrderApiError,
    ReviewApiError,
};
