use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::orchestrator::user_registration::UserRegistrationError;
use crate::auth::application::use_cases::create_user::{CreateUserError, CreateUserInput};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    #[schema(example = "Nguyen Van A")]
    pub name: String,
    #[schema(example = "customer@example.com")]
    pub email: String,
    #[schema(example = "secret123")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct RegisteredUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterUserResponse {
    pub user: RegisteredUser,
    pub message: String,
}

/// Register a customer account
///
/// The account starts unverified; a verification link is emailed in the background.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Account created", body = inline(SuccessResponse<RegisterUserResponse>)),
        (status = 400, description = "Invalid name, email or password", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let input = match CreateUserInput::new(dto.name, dto.email, dto.password) {
        Ok(input) => input,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    match data.auth.register.register_user(input).await {
        Ok(output) => {
            info!(user_id = %output.user_id, "User registered");
            ApiResponse::created(RegisterUserResponse {
                user: RegisteredUser {
                    id: output.user_id.value(),
                    name: output.name,
                    email: output.email,
                },
                message: output.message,
            })
        }
        Err(UserRegistrationError::CreateUserFailed(CreateUserError::InvalidInput(msg))) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(UserRegistrationError::CreateUserFailed(CreateUserError::EmailAlreadyExists)) => {
            warn!("Registration rejected: email already exists");
            ApiResponse::conflict("EMAIL_ALREADY_EXISTS", "Email is already registered")
        }
        Err(UserRegistrationError::CreateUserFailed(e)) => {
            error!(error = %e, "Registration failed");
            ApiResponse::internal_error()
        }
    }
}
