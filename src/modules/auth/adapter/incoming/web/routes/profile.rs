use actix_web::{get, patch, post, web, Responder};
use serde::Deserialize;
use tracing::{error, info};
use utoipa::{IntoParams, ToSchema};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::{AdminUser, AuthenticatedUser};
use crate::auth::application::ports::outgoing::UserRepositoryError;
use crate::auth::application::use_cases::change_password::{
    ChangePasswordError, ChangePasswordInput,
};
use crate::auth::application::use_cases::fetch_profile::{FetchUserError, UserProfile};
use crate::auth::application::use_cases::update_profile::{UpdateUserError, UpdateUserInput};
use crate::shared::api::ApiResponse;
use crate::shared::pagination::{PageRequest, PageResult};
use crate::AppState;

use super::resend_verification::MessageResponse;

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile", body = inline(SuccessResponse<UserProfile>)),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[get("/api/users/me")]
pub async fn get_profile_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.auth.fetch_profile.execute(user.user_id).await {
        Ok(profile) => ApiResponse::success(profile),
        Err(FetchUserError::UserNotFound(_)) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Fetch profile failed");
            ApiResponse::internal_error()
        }
    }
}

/// Update name, phone or address
#[utoipa::path(
    patch,
    path = "/api/users/me",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = UpdateUserInput,
    responses(
        (status = 200, description = "Updated profile", body = inline(SuccessResponse<UserProfile>)),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[patch("/api/users/me")]
pub async fn update_profile_handler(
    user: AuthenticatedUser,
    req: web::Json<UpdateUserInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .auth
        .update_profile
        .execute(user.user_id, req.into_inner())
        .await
    {
        Ok(profile) => {
            info!(user_id = %user.user_id, "Profile updated");
            ApiResponse::success(profile)
        }
        Err(UpdateUserError::InvalidInput(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(UpdateUserError::RepositoryError(UserRepositoryError::UserNotFound)) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Update profile failed");
            ApiResponse::internal_error()
        }
    }
}

/// Change the password of the current user
#[utoipa::path(
    post,
    path = "/api/users/me/password",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordInput,
    responses(
        (status = 200, description = "Password changed", body = inline(SuccessResponse<MessageResponse>)),
        (status = 400, description = "Current password wrong or new password invalid", body = ErrorResponse),
    )
)]
#[post("/api/users/me/password")]
pub async fn change_password_handler(
    user: AuthenticatedUser,
    req: web::Json<ChangePasswordInput>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .auth
        .change_password
        .execute(user.user_id, req.into_inner())
        .await
    {
        Ok(()) => ApiResponse::success(MessageResponse::new("Password changed successfully")),
        Err(ChangePasswordError::WrongCurrentPassword) => {
            ApiResponse::bad_request("WRONG_PASSWORD", "Current password is incorrect")
        }
        Err(ChangePasswordError::WeakPassword(msg)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(ChangePasswordError::SamePassword) => ApiResponse::bad_request(
            "VALIDATION_ERROR",
            "New password must differ from the current one",
        ),
        Err(ChangePasswordError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Change password failed");
            ApiResponse::internal_error()
        }
    }
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Matches name or email, case-insensitive.
    pub search: Option<String>,
}

/// List customer and admin accounts
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Page of users", body = inline(SuccessResponse<PageResult<UserProfile>>)),
        (status = 403, description = "Admin role required", body = ErrorResponse),
    )
)]
#[get("/api/admin/users")]
pub async fn list_users_handler(
    admin: AdminUser,
    query: web::Query<ListUsersQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let page = PageRequest::new(query.page, query.per_page, 20);
    let search = query.search.filter(|s| !s.trim().is_empty());

    match data.auth.list_users.execute(search, page).await {
        Ok(result) => ApiResponse::success(result),
        Err(e) => {
            error!(admin_id = %admin.user_id, error = %e, "List users failed");
            ApiResponse::internal_error()
        }
    }
}
