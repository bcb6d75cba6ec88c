use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::payment::application::domain::entities::{PaymentLink, PaymentProvider};
use crate::payment::application::ports::incoming::use_cases::CreatePaymentError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    pub provider: PaymentProvider,
}

/// Start an online payment for a draft order
#[utoipa::path(
    post,
    path = "/api/orders/{id}/payment",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "Checkout link", body = inline(SuccessResponse<PaymentLink>)),
        (status = 400, description = "Provider does not match the order", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse),
        (status = 409, description = "Order is not awaiting payment", body = ErrorResponse),
        (status = 502, description = "Gateway error", body = ErrorResponse),
        (status = 503, description = "Provider not configured", body = ErrorResponse),
    )
)]
#[post("/api/orders/{id}/payment")]
pub async fn create_payment_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<CreatePaymentRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let order_id = path.into_inner();

    match data
        .payments
        .create
        .execute(order_id, user.user_id, req.provider)
        .await
    {
        Ok(link) => ApiResponse::success(link),
        Err(CreatePaymentError::OrderNotFound) => {
            ApiResponse::not_found("ORDER_NOT_FOUND", "Order not found")
        }
        Err(e @ CreatePaymentError::NotPayable(_)) => {
            ApiResponse::conflict("ORDER_NOT_PAYABLE", &e.to_string())
        }
        Err(e @ CreatePaymentError::ProviderMismatch) => {
            ApiResponse::bad_request("PAYMENT_METHOD_MISMATCH", &e.to_string())
        }
        Err(e @ CreatePaymentError::ProviderUnavailable(_)) => {
            ApiResponse::service_unavailable("PAYMENT_PROVIDER_UNAVAILABLE", &e.to_string())
        }
        Err(CreatePaymentError::GatewayFailed(_)) => ApiResponse::bad_gateway(
            "PAYMENT_GATEWAY_ERROR",
            "Payment provider could not create the payment",
        ),
        Err(e) => {
            error!(%order_id, error = %e, "Create payment failed");
            ApiResponse::internal_error()
        }
    }
}
