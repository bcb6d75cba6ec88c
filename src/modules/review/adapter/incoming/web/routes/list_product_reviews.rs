use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::review::application::domain::entities::ProductReviews;
use crate::shared::api::ApiResponse;
use crate::shared::pagination::PageRequest;
use crate::AppState;

const DEFAULT_PER_PAGE: u32 = 10;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct ReviewsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Reviews of a product with its rating summary
#[utoipa::path(
    get,
    path = "/api/products/{id}/reviews",
    tag = "reviews",
    params(("id" = Uuid, Path, description = "Product ID"), ReviewsQuery),
    responses(
        (status = 200, description = "Reviews and rating summary", body = inline(SuccessResponse<ProductReviews>)),
        (status = 400, description = "Invalid product id", body = ErrorResponse),
    )
)]
#[get("/api/products/{id}/reviews")]
pub async fn list_product_reviews_handler(
    path: web::Path<Uuid>,
    query: web::Query<ReviewsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let product_id = path.into_inner();
    let page = PageRequest::new(query.page, query.per_page, DEFAULT_PER_PAGE);

    match data.reviews.list.execute(product_id, page).await {
        Ok(reviews) => ApiResponse::success(reviews),
        Err(e) => {
            error!(%product_id, error = %e, "List reviews failed");
            ApiResponse::internal_error()
        }
    }
}
