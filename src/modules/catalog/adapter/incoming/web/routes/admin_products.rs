use actix_web::{delete, patch, post, web, Responder};
use tracing::{error, info};
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::domain::product_rules::{NewProduct, ProductPatch};
use crate::catalog::application::ports::incoming::use_cases::{
    CreateProductError, DeleteProductError, UpdateProductError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Add a product to the catalog
#[utoipa::path(
    post,
    path = "/api/admin/products",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = inline(SuccessResponse<Product>)),
        (status = 400, description = "Invalid product", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
    )
)]
#[post("/api/admin/products")]
pub async fn create_product_handler(
    admin: AdminUser,
    req: web::Json<NewProduct>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.catalog.create.execute(req.into_inner()).await {
        Ok(product) => {
            info!(admin_id = %admin.user_id, product_id = %product.id, "Product created");
            ApiResponse::created(product)
        }
        Err(CreateProductError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(e) => {
            error!(admin_id = %admin.user_id, error = %e, "Create product failed");
            ApiResponse::internal_error()
        }
    }
}

/// Partially update a product
#[utoipa::path(
    patch,
    path = "/api/admin/products/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = ProductPatch,
    responses(
        (status = 200, description = "Product updated", body = inline(SuccessResponse<Product>)),
        (status = 400, description = "Invalid changes", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
#[patch("/api/admin/products/{id}")]
pub async fn update_product_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<ProductPatch>,
    data: web::Data<AppState>,
) -> impl Responder {
    let product_id = path.into_inner();

    match data
        .catalog
        .update
        .execute(product_id, req.into_inner())
        .await
    {
        Ok(product) => {
            info!(admin_id = %admin.user_id, %product_id, "Product updated");
            ApiResponse::success(product)
        }
        Err(UpdateProductError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(UpdateProductError::NotFound) => {
            ApiResponse::not_found("PRODUCT_NOT_FOUND", "Product not found")
        }
        Err(e) => {
            error!(admin_id = %admin.user_id, %product_id, error = %e, "Update product failed");
            ApiResponse::internal_error()
        }
    }
}

/// Soft-delete a product
#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
#[delete("/api/admin/products/{id}")]
pub async fn delete_product_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let product_id = path.into_inner();

    match data.catalog.delete.execute(product_id).await {
        Ok(()) => {
            info!(admin_id = %admin.user_id, %product_id, "Product deleted");
            ApiResponse::no_content()
        }
        Err(DeleteProductError::NotFound) => {
            ApiResponse::not_found("PRODUCT_NOT_FOUND", "Product not found")
        }
        Err(e) => {
            error!(admin_id = %admin.user_id, %product_id, error = %e, "Delete product failed");
            ApiResponse::internal_error()
        }
    }
}
