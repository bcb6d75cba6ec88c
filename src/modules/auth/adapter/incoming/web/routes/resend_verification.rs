use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::SuccessResponse;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct EmailRequest {
    #[schema(example = "customer@example.com")]
    pub email: String,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

const RESEND_MESSAGE: &str =
    "If an unverified account exists for this email, a new verification link has been sent.";

/// Resend the verification email
///
/// Always answers 200 so callers cannot discover which emails are registered.
#[utoipa::path(
    post,
    path = "/api/auth/resend-verification",
    tag = "auth",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Request accepted", body = inline(SuccessResponse<MessageResponse>)),
    )
)]
#[post("/api/auth/resend-verification")]
pub async fn resend_verification_handler(
    req: web::Json<EmailRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(e) = data.auth.resend_verification.execute(&req.email).await {
        error!(error = %e, "Resend verification failed");
    }

    ApiResponse::success(MessageResponse::new(RESEND_MESSAGE))
}
