use actix_web::{web, HttpResponse};
use markethub_engine::{db_types::Role, traits::FaqManagement, FaqApi};

use crate::{
    data_objects::{FaqRequest, JsonResponse},
    errors::ServerError,
    route,
};

route!(list_faqs => Get "/faqs" impl FaqManagement);
pub async fn list_faqs<B: FaqManagement>(api: web::Data<FaqApi<B>>) -> Result<HttpResponse, ServerError> {
    let faqs = api.all().await?;
    Ok(HttpResponse::Ok().json(faqs))
}

route!(create_faq => Post "/faqs" impl FaqManagement where requires [Role::Admin]);
pub async fn create_faq<B: FaqManagement>(
    body: web::Json<FaqRequest>,
    api: web::Data<FaqApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let body = body.into_inner();
    if body.question.is_empty() || body.answer.is_empty() {
        return Err(ServerError::InvalidInput("Both question and answer are required.".to_string()));
    }
    let faq = api.create(&body.question, &body.answer, body.category.as_deref()).await?;
    Ok(HttpResponse::Created().json(faq))
}

route!(update_faq => Put "/faqs/{id}" impl FaqManagement where requires [Role::Admin]);
pub async fn update_faq<B: FaqManagement>(
    path: web::Path<i64>,
    body: web::Json<FaqRequest>,
    api: web::Data<FaqApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let body = body.into_inner();
    let faq = api.update(path.into_inner(), &body.question, &body.answer, body.category.as_deref()).await?;
    Ok(HttpResponse::Ok().json(faq))
}

route!(delete_faq => Delete "/faqs/{id}" impl FaqManagement where requires [Role::Admin]);
pub async fn delete_faq<B: FaqManagement>(
    path: web::Path<i64>,
    api: web::Data<FaqApi<B>>,
) -> Result<HttpResponse, ServerError> {
    api.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("FAQ deleted successfully")))
}
