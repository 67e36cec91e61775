use actix_web::{web, HttpResponse};
use markethub_engine::{traits::NotificationManagement, NotificationApi};

use crate::{
    auth::Identity,
    data_objects::{CreateNotificationRequest, UnreadCountResponse},
    errors::ServerError,
    route,
};

route!(my_notifications => Get "/notifications" impl NotificationManagement);
pub async fn my_notifications<B: NotificationManagement>(
    identity: Identity,
    api: web::Data<NotificationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let notifications = api.notifications_for(identity.user_id()).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

route!(unread_count => Get "/notifications/unread" impl NotificationManagement);
/// Drives the navbar badge.
pub async fn unread_count<B: NotificationManagement>(
    identity: Identity,
    api: web::Data<NotificationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let unread_count = api.unread_count(identity.user_id()).await?;
    Ok(HttpResponse::Ok().json(UnreadCountResponse { unread_count }))
}

route!(mark_notification_read => Put "/notifications/{id}/read" impl NotificationManagement);
pub async fn mark_notification_read<B: NotificationManagement>(
    _identity: Identity,
    path: web::Path<i64>,
    api: web::Data<NotificationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let notification = api.mark_read(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(notification))
}

route!(create_notification => Post "/notifications" impl NotificationManagement);
pub async fn create_notification<B: NotificationManagement>(
    _identity: Identity,
    body: web::Json<CreateNotificationRequest>,
    api: web::Data<NotificationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let body = body.into_inner();
    if body.message.is_empty() || body.kind.is_empty() {
        return Err(ServerError::InvalidInput("Missing required fields".to_string()));
    }
    let notification = api.create(body.user_id, &body.message, &body.kind).await?;
    Ok(HttpResponse::Created().json(notification))
}
