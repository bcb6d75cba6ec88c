use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::domain::password_policy::validate_password;
use crate::auth::application::helpers::opaque_token::hash_token;
use crate::auth::application::ports::outgoing::{
    PasswordHasher, TokenRepository, UserQuery, UserRepository,
};

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ResetPasswordInput {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Reset token is invalid or has expired")]
    InvalidToken,

    #[error("{0}")]
    WeakPassword(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

#[async_trait]
pub trait IResetPasswordUseCase: Send + Sync {
    async fn execute(&self, input: ResetPasswordInput) -> Result<(), ResetPasswordError>;
}

#[derive(Clone)]
pub struct ResetPasswordUseCase {
    query: Arc<dyn UserQuery>,
    repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_repository: Arc<dyn TokenRepository>,
}

impl ResetPasswordUseCase {
    pub fn new(
        query: Arc<dyn UserQuery>,
        repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_repository: Arc<dyn TokenRepository>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            token_repository,
        }
    }
}

#[async_trait]
impl IResetPasswordUseCase for ResetPasswordUseCase {
    async fn execute(&self, input: ResetPasswordInput) -> Result<(), ResetPasswordError> {
        let token = input.token.trim();
        if token.is_empty() {
            return Err(ResetPasswordError::InvalidToken);
        }

        let user = self
            .query
            .find_by_reset_token_hash(&hash_token(token))
            .await
            .map_err(|e| ResetPasswordError::StorageError(e.to_string()))?
            .filter(|u| !u.is_deleted && u.reset_token_valid_at(Utc::now()))
            .ok_or(ResetPasswordError::InvalidToken)?;

        validate_password(&input.new_password)
            .map_err(|e| ResetPasswordError::WeakPassword(e.to_string()))?;

        let password_hash = self
            .password_hasher
            .hash_password(&input.new_password)
            .await
            .map_err(|e| ResetPasswordError::HashingFailed(e.to_string()))?;

        let user_id = UserId::from(user.id);
        self.repository
            .update_password(user_id, password_hash)
            .await
            .map_err(|e| ResetPasswordError::StorageError(e.to_string()))?;

        if let Err(e) = self.token_repository.revoke_all_user_tokens(user_id).await {
            tracing::warn!(user_id = %user_id, "Failed to revoke sessions after reset: {}", e);
        }

        tracing::info!(user_id = %user_id, "Password reset completed");
        Ok(())
    }
}
