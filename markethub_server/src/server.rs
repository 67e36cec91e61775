use std::{sync::Arc, time::Duration};

use actix_web::{middleware::Logger, web, App, HttpServer};
use markethub_engine::{
    CartApi,
    CatalogApi,
    FaqApi,
    IdentityApi,
    ModerationApi,
    NotificationApi,
    OrderFlowApi,
    ReviewApi,
    SqliteDatabase,
};

use crate::{
    auth::TokenIssuer,
    chat::ChatRelay,
    config::ServerConfig,
    errors::ServerError,
    mailer::{LogMailer, VerificationMailer},
    middleware::JwtGateFactory,
    routes::{
        chat_history,
        chat_send,
        chat_stream,
        health,
        AddReviewRoute,
        AddToCartRoute,
        AdminCreateUserRoute,
        AdminDeleteUserRoute,
        AdminOrderStatusRoute,
        AdminOrdersRoute,
        AdminProductsRoute,
        AdminUpdateUserRoute,
        ApproveProductRoute,
        ApproveVendorRoute,
        AuditLogsRoute,
        CancelOrderRoute,
        ClearCartRoute,
        CreateFaqRoute,
        CreateNotificationRoute,
        CreateProductRoute,
        DecreaseCartItemRoute,
        DeleteFaqRoute,
        DeleteProductRoute,
        DeleteReviewRoute,
        GetCartRoute,
        GetProductRoute,
        GetUserRoute,
        IncreaseCartItemRoute,
        ListFaqsRoute,
        ListProductsRoute,
        ListUsersRoute,
        LoginRoute,
        MarkNotificationReadRoute,
        MyNotificationsRoute,
        MyOrdersRoute,
        MyProfileRoute,
        OrderByIdRoute,
        PlaceOrderRoute,
        ProductDetailsRoute,
        ProductReviewsRoute,
        RejectProductRoute,
        RejectVendorRoute,
        RemoveCartItemRoute,
        ResolveOrderRoute,
        SalesReportRoute,
        SearchProductsRoute,
        SignupRoute,
        UnreadCountRoute,
        UpdateCartItemRoute,
        UpdateFaqRoute,
        UpdateOrderStatusRoute,
        UpdateProductRoute,
        UpdateProfileRoute,
        VerifyEmailRoute,
    },
};

/// The public base URL, used when building links that leave the system (email verification).
#[derive(Clone, Debug)]
pub struct BaseUrl(pub String);

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
) -> Result<actix_web::dev::Server, ServerError> {
    // The chat relay is an explicit process-wide registry: created once here, shared by every
    // worker, and reset only by a process restart.
    let chat_relay = ChatRelay::new(Duration::from_millis(config.chat_reply_delay_ms));
    let mailer: Arc<dyn VerificationMailer> = Arc::new(LogMailer);
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let identity_api = IdentityApi::new(db.clone());
        let catalog_api = CatalogApi::new(db.clone());
        let cart_api = CartApi::new(db.clone());
        let order_api = OrderFlowApi::new(db.clone());
        let notification_api = NotificationApi::new(db.clone());
        let review_api = ReviewApi::new(db.clone());
        let faq_api = FaqApi::new(db.clone());
        let moderation_api = ModerationApi::new(db.clone());
        let jwt_signer = TokenIssuer::new(&config.auth);
        let base_url = BaseUrl(config.base_url.clone());
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("mh::access_log"))
            .app_data(web::Data::new(identity_api))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(cart_api))
            .app_data(web::Data::new(order_api))
            .app_data(web::Data::new(notification_api))
            .app_data(web::Data::new(review_api))
            .app_data(web::Data::new(faq_api))
            .app_data(web::Data::new(moderation_api))
            .app_data(web::Data::new(jwt_signer.clone()))
            .app_data(web::Data::new(mailer.clone()))
            .app_data(web::Data::new(base_url))
            .app_data(web::Data::from(chat_relay.clone()));
        // Everything under /api passes the JWT gate. Routes that are public simply never
        // extract an identity; protected routes do, and role-gated routes also carry the ACL.
        let api_scope = web::scope("/api")
            .wrap(JwtGateFactory::new(jwt_signer))
            // Auth
            .service(SignupRoute::<SqliteDatabase>::new())
            .service(VerifyEmailRoute::<SqliteDatabase>::new())
            .service(LoginRoute::<SqliteDatabase>::new())
            .service(MyProfileRoute::<SqliteDatabase>::new())
            .service(UpdateProfileRoute::<SqliteDatabase>::new())
            // Catalog. Search and details must register ahead of the `{id}` catch-all.
            .service(ListProductsRoute::<SqliteDatabase>::new())
            .service(SearchProductsRoute::<SqliteDatabase>::new())
            .service(ProductDetailsRoute::<SqliteDatabase>::new())
            .service(GetProductRoute::<SqliteDatabase>::new())
            .service(CreateProductRoute::<SqliteDatabase>::new())
            .service(UpdateProductRoute::<SqliteDatabase>::new())
            .service(DeleteProductRoute::<SqliteDatabase>::new())
            // Cart
            .service(AddToCartRoute::<SqliteDatabase>::new())
            .service(GetCartRoute::<SqliteDatabase>::new())
            .service(UpdateCartItemRoute::<SqliteDatabase>::new())
            .service(IncreaseCartItemRoute::<SqliteDatabase>::new())
            .service(DecreaseCartItemRoute::<SqliteDatabase>::new())
            .service(RemoveCartItemRoute::<SqliteDatabase>::new())
            .service(ClearCartRoute::<SqliteDatabase>::new())
            // Orders
            .service(PlaceOrderRoute::<SqliteDatabase>::new())
            .service(MyOrdersRoute::<SqliteDatabase>::new())
            .service(OrderByIdRoute::<SqliteDatabase>::new())
            .service(UpdateOrderStatusRoute::<SqliteDatabase>::new())
            .service(CancelOrderRoute::<SqliteDatabase>::new())
            // Reviews
            .service(AddReviewRoute::<SqliteDatabase>::new())
            .service(ProductReviewsRoute::<SqliteDatabase>::new())
            .service(DeleteReviewRoute::<SqliteDatabase>::new())
            // Notifications
            .service(MyNotificationsRoute::<SqliteDatabase>::new())
            .service(UnreadCountRoute::<SqliteDatabase>::new())
            .service(MarkNotificationReadRoute::<SqliteDatabase>::new())
            .service(CreateNotificationRoute::<SqliteDatabase>::new())
            // FAQs
            .service(ListFaqsRoute::<SqliteDatabase>::new())
            .service(CreateFaqRoute::<SqliteDatabase>::new())
            .service(UpdateFaqRoute::<SqliteDatabase>::new())
            .service(DeleteFaqRoute::<SqliteDatabase>::new())
            // Vendors
            .service(SalesReportRoute::<SqliteDatabase>::new())
            // Admin moderation
            .service(ListUsersRoute::<SqliteDatabase>::new())
            .service(GetUserRoute::<SqliteDatabase>::new())
            .service(AdminUpdateUserRoute::<SqliteDatabase>::new())
            .service(AdminDeleteUserRoute::<SqliteDatabase>::new())
            .service(AdminCreateUserRoute::<SqliteDatabase>::new())
            .service(ApproveVendorRoute::<SqliteDatabase>::new())
            .service(RejectVendorRoute::<SqliteDatabase>::new())
            .service(AdminProductsRoute::<SqliteDatabase>::new())
            .service(ApproveProductRoute::<SqliteDatabase>::new())
            .service(RejectProductRoute::<SqliteDatabase>::new())
            .service(AdminOrdersRoute::<SqliteDatabase>::new())
            .service(AdminOrderStatusRoute::<SqliteDatabase>::new())
            .service(ResolveOrderRoute::<SqliteDatabase>::new())
            .service(AuditLogsRoute::<SqliteDatabase>::new());
        let chat_scope = web::scope("/chat")
            .route("/history", web::get().to(chat_history))
            .route("/send", web::post().to(chat_send))
            .route("/stream", web::get().to(chat_stream));
        app.service(health).service(api_scope).service(chat_scope)
    })
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
