use actix_web::{post, web, HttpResponse, Responder};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::payment::application::domain::entities::PaymentProvider;
use crate::payment::application::ports::incoming::use_cases::{
    HandleNotificationError, NotificationOutcome,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAck {
    pub success: bool,
}

async fn handle(
    data: &AppState,
    provider: PaymentProvider,
    payload: Value,
) -> Result<NotificationOutcome, HttpResponse> {
    data.payments
        .notify
        .execute(provider, payload)
        .await
        .map_err(|e| match &e {
            HandleNotificationError::InvalidSignature => {
                ApiResponse::bad_request("INVALID_SIGNATURE", "Signature verification failed")
            }
            HandleNotificationError::MalformedPayload(msg) => {
                ApiResponse::bad_request("INVALID_PAYLOAD", msg)
            }
            HandleNotificationError::UnknownReference => {
                warn!(%provider, "Payment notification for unknown reference");
                ApiResponse::not_found("ORDER_NOT_FOUND", "No order for this payment")
            }
            HandleNotificationError::ProviderUnavailable(_) => ApiResponse::service_unavailable(
                "PAYMENT_PROVIDER_UNAVAILABLE",
                &e.to_string(),
            ),
            HandleNotificationError::RepositoryError(_) => {
                error!(%provider, error = %e, "Payment notification processing failed");
                ApiResponse::internal_error()
            }
        })
}

/// MoMo instant payment notification
#[utoipa::path(
    post,
    path = "/api/payments/momo/ipn",
    tag = "payments",
    request_body = Object,
    responses(
        (status = 204, description = "Notification accepted"),
        (status = 400, description = "Invalid signature or payload", body = ErrorResponse),
        (status = 404, description = "Unknown payment reference", body = ErrorResponse),
    )
)]
#[post("/api/payments/momo/ipn")]
pub async fn momo_ipn_handler(
    payload: web::Json<Value>,
    data: web::Data<AppState>,
) -> impl Responder {
    match handle(&data, PaymentProvider::Momo, payload.into_inner()).await {
        Ok(outcome) => {
            info!(?outcome, "MoMo IPN processed");
            ApiResponse::no_content()
        }
        Err(resp) => resp,
    }
}

/// PayOS payment webhook
#[utoipa::path(
    post,
    path = "/api/payments/payos/webhook",
    tag = "payments",
    request_body = Object,
    responses(
        (status = 200, description = "Notification accepted", body = WebhookAck),
        (status = 400, description = "Invalid signature or payload", body = ErrorResponse),
        (status = 404, description = "Unknown payment reference", body = ErrorResponse),
    )
)]
#[post("/api/payments/payos/webhook")]
pub async fn payos_webhook_handler(
    payload: web::Json<Value>,
    data: web::Data<AppState>,
) -> impl Responder {
    match handle(&data, PaymentProvider::Payos, payload.into_inner()).await {
        Ok(outcome) => {
            info!(?outcome, "PayOS webhook processed");
            HttpResponse::Ok().json(WebhookAck { success: true })
        }
        Err(resp) => resp,
    }
}
