use actix_web::{web, HttpResponse};
use markethub_engine::{db_types::NewReview, traits::ReviewManagement, ReviewApi};

use crate::{
    auth::Identity,
    data_objects::{AddReviewRequest, JsonResponse},
    errors::ServerError,
    route,
};

route!(add_review => Post "/reviews/add" impl ReviewManagement);
/// The rating is deliberately not range-checked server-side, matching the observed system.
pub async fn add_review<B: ReviewManagement>(
    identity: Identity,
    body: web::Json<AddReviewRequest>,
    api: web::Data<ReviewApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let body = body.into_inner();
    let review = NewReview {
        product_id: body.product_id,
        customer_id: identity.user_id(),
        rating: body.rating,
        comment: body.comment,
    };
    let review = api.add_review(review).await?;
    Ok(HttpResponse::Created().json(review))
}

route!(product_reviews => Get "/reviews/{product_id}" impl ReviewManagement);
pub async fn product_reviews<B: ReviewManagement>(
    path: web::Path<i64>,
    api: web::Data<ReviewApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let reviews = api.reviews_for_product(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

route!(delete_review => Delete "/reviews/{review_id}" impl ReviewManagement);
pub async fn delete_review<B: ReviewManagement>(
    identity: Identity,
    path: web::Path<i64>,
    api: web::Data<ReviewApi<B>>,
) -> Result<HttpResponse, ServerError> {
    api.delete_own_review(identity.user_id(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Review deleted successfully")))
}
