use actix_web::HttpResponse;
use tracing::error;
use uuid::Uuid;

use crate::order::application::ports::incoming::use_cases::ChangeOrderStatusError;
use crate::shared::api::ApiResponse;

pub(super) fn status_change_failed(order_id: Uuid, err: ChangeOrderStatusError) -> HttpResponse {
    match err {
        ChangeOrderStatusError::NotFound => {
            ApiResponse::not_found("ORDER_NOT_FOUND", "Order not found")
        }
        ChangeOrderStatusError::InvalidTransition { .. } => {
            ApiResponse::conflict("INVALID_STATUS_TRANSITION", &err.to_string())
        }
        ChangeOrderStatusError::NotAllowed(_) => {
            ApiResponse::forbidden("TRANSITION_NOT_ALLOWED", &err.to_string())
        }
        ChangeOrderStatusError::StatusConflict => ApiResponse::conflict(
            "ORDER_STATUS_CONFLICT",
            "Order was updated by someone else, reload and retry",
        ),
        ChangeOrderStatusError::InsufficientStock(_) => {
            ApiResponse::conflict("INSUFFICIENT_STOCK", &err.to_string())
        }
        ChangeOrderStatusError::RepositoryError(_) => {
            error!(%order_id, error = %err, "Order status change failed");
            ApiResponse::internal_error()
        }
    }
}
