use actix_web::{get, web, Responder};
use tracing::error;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::ports::incoming::use_cases::GetProductError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Product detail
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = inline(SuccessResponse<Product>)),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
#[get("/api/products/{id}")]
pub async fn get_product_handler(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let product_id = path.into_inner();

    match data.catalog.get.execute(product_id).await {
        Ok(product) => ApiResponse::success(product),
        Err(GetProductError::NotFound) => {
            ApiResponse::not_found("PRODUCT_NOT_FOUND", "Product not found")
        }
        Err(e) => {
            error!(%product_id, error = %e, "Get product failed");
            ApiResponse::internal_error()
        }
    }
}
