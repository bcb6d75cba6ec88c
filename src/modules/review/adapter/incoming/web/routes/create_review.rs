use actix_web::{post, web, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::VerifiedUser;
use crate::review::application::domain::entities::{NewReview, Review};
use crate::review::application::ports::incoming::use_cases::CreateReviewError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Review a product from one of your delivered orders
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "reviews",
    security(("bearer_auth" = [])),
    request_body = NewReview,
    responses(
        (status = 201, description = "Review created", body = inline(SuccessResponse<Review>)),
        (status = 400, description = "Invalid rating or comment", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Already reviewed", body = ErrorResponse),
        (status = 422, description = "Order not delivered or product not in order", body = ErrorResponse),
    )
)]
#[post("/api/reviews")]
pub async fn create_review_handler(
    user: VerifiedUser,
    req: web::Json<NewReview>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.reviews.create.execute(user.user_id, req.into_inner()).await {
        Ok(review) => ApiResponse::created(review),
        Err(CreateReviewError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(CreateReviewError::OrderNotFound) => {
            ApiResponse::not_found("ORDER_NOT_FOUND", "Order not found")
        }
        Err(e @ CreateReviewError::NotDelivered) => {
            ApiResponse::unprocessable("ORDER_NOT_DELIVERED", &e.to_string())
        }
        Err(e @ CreateReviewError::ProductNotInOrder) => {
            ApiResponse::unprocessable("PRODUCT_NOT_IN_ORDER", &e.to_string())
        }
        Err(e @ CreateReviewError::AlreadyReviewed) => {
            ApiResponse::conflict("REVIEW_ALREADY_EXISTS", &e.to_string())
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Create review failed");
            ApiResponse::internal_error()
        }
    }
}
