use actix_web::{get, patch, post, web, Responder};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{error, info};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::order::application::domain::entities::{Order, OrderListFilter, OrderStatus};
use crate::order::application::domain::stats::{OrderStats, StatsRange};
use crate::order::application::domain::transitions::TransitionActor;
use crate::order::application::ports::incoming::use_cases::{CompleteRefundError, OrderStatsError};
use crate::shared::api::ApiResponse;
use crate::shared::pagination::{PageRequest, PageResult};
use crate::AppState;

use super::errors::status_change_failed;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct AdminOrdersQuery {
    #[param(inline)]
    pub status: Option<OrderStatus>,
    pub user_id: Option<Uuid>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// All orders, optionally filtered by status or customer
#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(AdminOrdersQuery),
    responses(
        (status = 200, description = "Page of orders", body = inline(SuccessResponse<PageResult<Order>>)),
        (status = 403, description = "Admin role required", body = ErrorResponse),
    )
)]
#[get("/api/admin/orders")]
pub async fn admin_list_orders_handler(
    _admin: AdminUser,
    query: web::Query<AdminOrdersQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let filter = OrderListFilter {
        status: query.status,
        user_id: query.user_id,
    };
    let page = PageRequest::new(query.page, query.per_page, 20);

    match data.orders.list.execute(filter, page).await {
        Ok(result) => ApiResponse::success(result),
        Err(e) => {
            error!(error = %e, "Admin order listing failed");
            ApiResponse::internal_error()
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Move an order along its lifecycle
#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = inline(SuccessResponse<Order>)),
        (status = 403, description = "Transition not allowed for admins", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Illegal transition, concurrent update or insufficient stock", body = ErrorResponse),
    )
)]
#[patch("/api/admin/orders/{id}/status")]
pub async fn update_order_status_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateOrderStatusRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let order_id = path.into_inner();
    let next = req.into_inner().status;

    match data
        .orders
        .change_status
        .execute(order_id, TransitionActor::Admin(admin.user_id), next)
        .await
    {
        Ok(order) => {
            info!(%order_id, admin_id = %admin.user_id, status = %next, "Order status updated");
            ApiResponse::success(order)
        }
        Err(e) => status_change_failed(order_id, e),
    }
}

/// Record that a pending refund has been paid back
#[utoipa::path(
    post,
    path = "/api/admin/orders/{id}/refund",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Refund completed", body = inline(SuccessResponse<Order>)),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "No refund pending", body = ErrorResponse),
    )
)]
#[post("/api/admin/orders/{id}/refund")]
pub async fn complete_refund_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let order_id = path.into_inner();

    match data.orders.complete_refund.execute(order_id, admin.user_id).await {
        Ok(order) => {
            info!(%order_id, admin_id = %admin.user_id, "Refund completed");
            ApiResponse::success(order)
        }
        Err(CompleteRefundError::NotFound) => {
            ApiResponse::not_found("ORDER_NOT_FOUND", "Order not found")
        }
        Err(CompleteRefundError::RefundNotPending) => {
            ApiResponse::conflict("REFUND_NOT_PENDING", "Order has no pending refund")
        }
        Err(e) => {
            error!(%order_id, error = %e, "Complete refund failed");
            ApiResponse::internal_error()
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct StatsQuery {
    /// RFC 3339 lower bound on order creation time
    pub from: Option<DateTime<Utc>>,
    /// RFC 3339 upper bound on order creation time
    pub to: Option<DateTime<Utc>>,
}

/// Dashboard statistics
#[utoipa::path(
    get,
    path = "/api/admin/orders/stats",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(StatsQuery),
    responses(
        (status = 200, description = "Order statistics", body = inline(SuccessResponse<OrderStats>)),
        (status = 400, description = "`from` is after `to`", body = ErrorResponse),
    )
)]
#[get("/api/admin/orders/stats")]
pub async fn order_stats_handler(
    _admin: AdminUser,
    query: web::Query<StatsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let range = StatsRange {
        from: query.from,
        to: query.to,
    };

    match data.orders.stats.execute(range).await {
        Ok(stats) => ApiResponse::success(stats),
        Err(OrderStatsError::InvalidRange) => {
            ApiResponse::bad_request("INVALID_RANGE", "`from` must not be after `to`")
        }
        Err(e) => {
            error!(error = %e, "Order stats failed");
            ApiResponse::internal_error()
        }
    }
}
