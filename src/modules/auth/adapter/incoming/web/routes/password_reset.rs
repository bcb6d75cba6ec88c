use actix_web::{post, web, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::reset_password::{ResetPasswordError, ResetPasswordInput};
use crate::shared::api::ApiResponse;
use crate::AppState;

use super::resend_verification::{EmailRequest, MessageResponse};

const FORGOT_MESSAGE: &str =
    "If an account exists for this email, a password reset link has been sent.";

/// Request a password reset link
///
/// Always answers 200 so callers cannot discover which emails are registered.
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = "auth",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Request accepted", body = inline(SuccessResponse<MessageResponse>)),
    )
)]
#[post("/api/auth/forgot-password")]
pub async fn forgot_password_handler(
    req: web::Json<EmailRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    if let Err(e) = data.auth.forgot_password.execute(&req.email).await {
        error!(error = %e, "Forgot password failed");
    }

    ApiResponse::success(MessageResponse::new(FORGOT_MESSAGE))
}

/// Set a new password using a reset token
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = "auth",
    request_body = ResetPasswordInput,
    responses(
        (status = 200, description = "Password updated", body = inline(SuccessResponse<MessageResponse>)),
        (status = 400, description = "Token invalid or password too weak", body = ErrorResponse),
    )
)]
#[post("/api/auth/reset-password")]
pub async fn reset_password_handler(
    req: web::Json<ResetPasswordInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.auth.reset_password.execute(req.into_inner()).await {
        Ok(()) => ApiResponse::success(MessageResponse::new(
            "Password has been reset. Please log in with your new password.",
        )),
        Err(ResetPasswordError::InvalidToken) => ApiResponse::bad_request(
            "INVALID_RESET_TOKEN",
            "Reset token is invalid or has expired",
        ),
        Err(ResetPasswordError::WeakPassword(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(e) => {
            error!(error = %e, "Password reset failed");
            ApiResponse::internal_error()
        }
    }
}
