use actix_web::{post, web, HttpRequest, Responder};
use serde::Deserialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::refresh_token::{
    RefreshTokenError, RefreshTokenRequest, RefreshTokenResponse,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

use super::super::cookies::REFRESH_TOKEN_COOKIE;

#[derive(Deserialize, ToSchema, Default)]
pub struct RefreshTokenRequestDto {
    /// Falls back to the `refresh_token` cookie when omitted.
    pub refresh_token: Option<String>,
}

/// Rotate the session tokens
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "auth",
    request_body(content = RefreshTokenRequestDto, description = "Optional when the refresh cookie is present"),
    responses(
        (status = 200, description = "New token pair", body = inline(SuccessResponse<RefreshTokenResponse>)),
        (status = 400, description = "No refresh token supplied", body = ErrorResponse),
        (status = 401, description = "Token expired, invalid or revoked", body = ErrorResponse),
    )
)]
#[post("/api/auth/refresh")]
pub async fn refresh_token_handler(
    http_req: HttpRequest,
    body: Option<web::Json<RefreshTokenRequestDto>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let token = body
        .and_then(|b| b.into_inner().refresh_token)
        .filter(|t| !t.trim().is_empty())
        .or_else(|| http_req.cookie(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string()))
        .unwrap_or_default();

    let request = match RefreshTokenRequest::new(token) {
        Ok(request) => request,
        Err(e) => return ApiResponse::bad_request("MISSING_REFRESH_TOKEN", &e.to_string()),
    };

    match data.auth.refresh_token.execute(request).await {
        Ok(response) => {
            let cookies = vec![
                data.cookies.access_cookie(&response.access_token),
                data.cookies.refresh_cookie(&response.refresh_token),
            ];
            ApiResponse::success_with_cookies(response, cookies)
        }
        Err(RefreshTokenError::TokenExpired) => {
            ApiResponse::unauthorized("TOKEN_EXPIRED", "Refresh token has expired")
        }
        Err(RefreshTokenError::TokenRevoked) => {
            warn!("Revoked refresh token presented");
            ApiResponse::unauthorized("TOKEN_REVOKED", "Refresh token has been revoked")
        }
        Err(RefreshTokenError::InvalidTokenType) => {
            ApiResponse::unauthorized("INVALID_TOKEN_TYPE", "Invalid token type")
        }
        Err(RefreshTokenError::TokenInvalid) | Err(RefreshTokenError::UserUnavailable) => {
            ApiResponse::unauthorized("INVALID_TOKEN", "Invalid refresh token")
        }
        Err(e) => {
            error!(error = %e, "Token refresh failed");
            ApiResponse::internal_error()
        }
    }
}
