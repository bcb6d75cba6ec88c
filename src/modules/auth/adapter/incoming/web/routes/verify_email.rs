use actix_web::{get, web, Responder};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::verify_user_email::VerifyUserEmailError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct VerifyEmailResponse {
    pub message: String,
}

/// Confirm an email address from the emailed link
#[utoipa::path(
    get,
    path = "/api/auth/email-verification/{token}",
    tag = "auth",
    params(("token" = String, Path, description = "Verification token from the email")),
    responses(
        (status = 200, description = "Email verified", body = inline(SuccessResponse<VerifyEmailResponse>)),
        (status = 400, description = "Token expired or invalid", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[get("/api/auth/email-verification/{token}")]
pub async fn verify_user_email_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let token = path.into_inner();

    match data.auth.verify_email.execute(&token).await {
        Ok(()) => ApiResponse::success(VerifyEmailResponse {
            message: "Email verified successfully".to_string(),
        }),
        Err(VerifyUserEmailError::TokenExpired) => {
            ApiResponse::bad_request("TOKEN_EXPIRED", "Verification link has expired")
        }
        Err(VerifyUserEmailError::TokenInvalid) => {
            warn!("Invalid verification token presented");
            ApiResponse::bad_request("INVALID_TOKEN", "Invalid verification token")
        }
        Err(VerifyUserEmailError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(VerifyUserEmailError::DatabaseError(e)) => {
            error!(error = %e, "Email verification failed");
            ApiResponse::internal_error()
        }
    }
}
