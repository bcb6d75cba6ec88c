use std::sync::Arc;

use async_trait::async_trait;
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::auth::application::domain::entities::{User, UserId, UserRole};
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider, UserQuery};

// ========================= Login Request =========================
/// Validated login request, deserialized straight from the JSON body.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginRequestError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl LoginRequest {
    pub fn new(email: String, password: String) -> Result<Self, LoginRequestError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LoginRequestError::EmptyEmail);
        }
        if !EmailAddress::is_valid(email) {
            return Err(LoginRequestError::InvalidEmailFormat);
        }
        if password.is_empty() {
            return Err(LoginRequestError::EmptyPassword);
        }

        Ok(Self {
            email: email.to_lowercase(),
            password,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl<'de> Deserialize<'de> for LoginRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct LoginRequestHelper {
            email: String,
            password: String,
        }

        let helper = LoginRequestHelper::deserialize(deserializer)?;
        LoginRequest::new(helper.email, helper.password).map_err(serde::de::Error::custom)
    }
}

// ====================== Login Error =============================
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User account has been deleted")]
    UserDeleted,

    #[error("Password verification failed: {0}")]
    PasswordVerificationFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Query error: {0}")]
    QueryError(String),
}

// ============================ Login Response =================================
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UserInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub is_verified: bool,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            is_verified: user.is_verified,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LoginUserResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

// ============================ Login User Use Case =============================
#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError>;
}

#[derive(Clone)]
pub struct LoginUserUseCase {
    query: Arc<dyn UserQuery>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
}

impl LoginUserUseCase {
    pub fn new(
        query: Arc<dyn UserQuery>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            query,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl ILoginUserUseCase for LoginUserUseCase {
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        // 1️⃣ Find user by (normalized) email
        let user = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| LoginError::QueryError(e.to_string()))?
            .ok_or(LoginError::InvalidCredentials)?;

        // 2️⃣ Verify password before revealing account state
        let is_valid = self
            .password_hasher
            .verify_password(request.password(), &user.password_hash)
            .await
            .map_err(|e| LoginError::PasswordVerificationFailed(e.to_string()))?;

        if !is_valid {
            return Err(LoginError::InvalidCredentials);
        }

        if user.is_deleted {
            return Err(LoginError::UserDeleted);
        }

        // 3️⃣ Issue tokens
        let user_id = UserId::from(user.id);
        let access_token = self
            .token_provider
            .generate_access_token(user_id, user.is_verified, user.role)
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        let refresh_token = self
            .token_provider
            .generate_refresh_token(user_id, user.is_verified, user.role)
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        tracing::info!(user_id = %user_id, "User logged in");

        Ok(LoginUserResponse {
            access_token,
            refresh_token,
            user: UserInfo::from(&user),
        })
    }
}
