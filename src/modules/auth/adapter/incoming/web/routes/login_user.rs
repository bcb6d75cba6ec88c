use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::login_user::{
    LoginError, LoginRequest, LoginUserResponse,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct LoginRequestDto {
    #[schema(example = "customer@example.com")]
    pub email: String,
    #[schema(example = "secret123")]
    pub password: String,
}

/// Log in with email and password
///
/// Tokens are returned in the body and also set as http-only cookies.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = inline(SuccessResponse<LoginUserResponse>)),
        (status = 401, description = "Invalid credentials", body = ErrorResponse,
            example = json!({"success": false, "error": {"code": "INVALID_CREDENTIALS", "message": "Invalid email or password"}})),
        (status = 403, description = "Account has been deleted", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match LoginRequest::new(dto.email, dto.password) {
        Ok(req) => req,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.auth.login.execute(request).await {
        Ok(response) => {
            info!(user_id = %response.user.id, "User logged in");
            let cookies = vec![
                data.cookies.access_cookie(&response.access_token),
                data.cookies.refresh_cookie(&response.refresh_token),
            ];
            ApiResponse::success_with_cookies(response, cookies)
        }
        Err(LoginError::InvalidCredentials) => {
            warn!("Login failed: invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }
        Err(LoginError::UserDeleted) => {
            warn!("Login failed: user deleted");
            ApiResponse::forbidden("USER_DELETED", "This account has been deleted")
        }
        Err(e) => {
            error!(error = %e, "Login failed");
            ApiResponse::internal_error()
        }
    }
}
