use actix_web::{get, post, web, Responder};
use serde::Deserialize;
use tracing::{error, info};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{AuthenticatedUser, VerifiedUser};
use crate::order::application::domain::checkout::NewOrderRequest;
use crate::order::application::domain::entities::{Order, OrderListFilter, OrderStatus};
use crate::order::application::domain::transitions::TransitionActor;
use crate::order::application::ports::incoming::use_cases::{
    CreateOrderError, GetOrderError, OrderViewer,
};
use crate::shared::api::ApiResponse;
use crate::shared::pagination::{PageRequest, PageResult};
use crate::AppState;

use super::errors::status_change_failed;

/// Place an order
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "orders",
    security(("bearer_auth" = [])),
    request_body = NewOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = inline(SuccessResponse<Order>)),
        (status = 400, description = "Invalid order", body = ErrorResponse),
        (status = 403, description = "Email not verified", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 409, description = "Insufficient stock", body = ErrorResponse),
    )
)]
#[post("/api/orders")]
pub async fn create_order_handler(
    user: VerifiedUser,
    req: web::Json<NewOrderRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.orders.create.execute(user.user_id, req.into_inner()).await {
        Ok(order) => ApiResponse::created(order),
        Err(CreateOrderError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(e @ CreateOrderError::ProductNotFound(_)) => {
            ApiResponse::not_found("PRODUCT_NOT_FOUND", &e.to_string())
        }
        Err(e @ CreateOrderError::InsufficientStock(_)) => {
            ApiResponse::conflict("INSUFFICIENT_STOCK", &e.to_string())
        }
        Err(CreateOrderError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Create order failed");
            ApiResponse::internal_error()
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct MyOrdersQuery {
    #[param(inline)]
    pub status: Option<OrderStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Orders of the current user, newest first
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "orders",
    security(("bearer_auth" = [])),
    params(MyOrdersQuery),
    responses(
        (status = 200, description = "Page of orders", body = inline(SuccessResponse<PageResult<Order>>)),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
    )
)]
#[get("/api/orders")]
pub async fn list_my_orders_handler(
    user: AuthenticatedUser,
    query: web::Query<MyOrdersQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let filter = OrderListFilter {
        status: query.status,
        user_id: Some(user.user_id.value()),
    };
    let page = PageRequest::new(query.page, query.per_page, 10);

    match data.orders.list.execute(filter, page).await {
        Ok(result) => ApiResponse::success(result),
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "List orders failed");
            ApiResponse::internal_error()
        }
    }
}

/// Order detail for its owner or an admin
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order", body = inline(SuccessResponse<Order>)),
        (status = 404, description = "Order not found", body = ErrorResponse),
    )
)]
#[get("/api/orders/{id}")]
pub async fn get_order_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let order_id = path.into_inner();
    let viewer = OrderViewer {
        user_id: user.user_id,
        is_admin: user.is_admin(),
    };

    match data.orders.get.execute(order_id, viewer).await {
        Ok(order) => ApiResponse::success(order),
        Err(GetOrderError::NotFound) => ApiResponse::not_found("ORDER_NOT_FOUND", "Order not found"),
        Err(e) => {
            error!(%order_id, error = %e, "Get order failed");
            ApiResponse::internal_error()
        }
    }
}

/// Cancel one of your own orders while it is a draft or pending
#[utoipa::path(
    post,
    path = "/api/orders/{id}/cancel",
    tag = "orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = inline(SuccessResponse<Order>)),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Order can no longer be cancelled", body = ErrorResponse),
    )
)]
#[post("/api/orders/{id}/cancel")]
pub async fn cancel_order_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let order_id = path.into_inner();

    match data
        .orders
        .change_status
        .execute(
            order_id,
            TransitionActor::Customer(user.user_id),
            OrderStatus::Cancelled,
        )
        .await
    {
        Ok(order) => {
            info!(%order_id, user_id = %user.user_id, "Order cancelled by customer");
            ApiResponse::success(order)
        }
        Err(e) => status_change_failed(order_id, e),
    }
}
