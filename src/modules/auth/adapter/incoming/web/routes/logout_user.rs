use actix_web::{post, web, HttpRequest, Responder};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::schemas::SuccessResponse;
use crate::auth::application::use_cases::logout_user::{LogoutRequest, LogoutResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;

use super::super::cookies::REFRESH_TOKEN_COOKIE;

#[derive(Deserialize, ToSchema, Default)]
pub struct LogoutRequestDto {
    pub refresh_token: Option<String>,
}

/// Log out and revoke the refresh token
///
/// Succeeds even without a token; the session cookies are always cleared.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    request_body(content = LogoutRequestDto, description = "Optional when the refresh cookie is present"),
    responses(
        (status = 200, description = "Logged out", body = inline(SuccessResponse<LogoutResponse>)),
    )
)]
#[post("/api/auth/logout")]
pub async fn logout_user_handler(
    http_req: HttpRequest,
    body: Option<web::Json<LogoutRequestDto>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let token = body
        .and_then(|b| b.into_inner().refresh_token)
        .filter(|t| !t.trim().is_empty())
        .or_else(|| http_req.cookie(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string()));

    let response = data.auth.logout.execute(LogoutRequest::new(token)).await;
    ApiResponse::success_with_cookies(response, data.cookies.cleared())
}
