use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::domain::password_policy::validate_password;
use crate::auth::application::ports::outgoing::{PasswordHasher, UserQuery, UserRepository};

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Current password is incorrect")]
    WrongCurrentPassword,

    #[error("{0}")]
    WeakPassword(String),

    #[error("New password must differ from the current one")]
    SamePassword,

    #[error("User not found")]
    UserNotFound,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

#[async_trait]
pub trait IChangePasswordUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: UserId,
        input: ChangePasswordInput,
    ) -> Result<(), ChangePasswordError>;
}

#[derive(Clone)]
pub struct ChangePasswordUseCase {
    query: Arc<dyn UserQuery>,
    repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl ChangePasswordUseCase {
    pub fn new(
        query: Arc<dyn UserQuery>,
        repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl IChangePasswordUseCase for ChangePasswordUseCase {
    async fn execute(
        &self,
        user_id: UserId,
        input: ChangePasswordInput,
    ) -> Result<(), ChangePasswordError> {
        let user = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| ChangePasswordError::StorageError(e.to_string()))?
            .filter(|u| !u.is_deleted)
            .ok_or(ChangePasswordError::UserNotFound)?;

        let matches = self
            .password_hasher
            .verify_password(&input.current_password, &user.password_hash)
            .await
            .map_err(|e| ChangePasswordError::HashingFailed(e.to_string()))?;
        if !matches {
            return Err(ChangePasswordError::WrongCurrentPassword);
        }

        if input.current_password == input.new_password {
            return Err(ChangePasswordError::SamePassword);
        }
        validate_password(&input.new_password)
            .map_err(|e| ChangePasswordError::WeakPassword(e.to_string()))?;

        let password_hash = self
            .password_hasher
            .hash_password(&input.new_password)
            .await
            .map_err(|e| ChangePasswordError::HashingFailed(e.to_string()))?;

        self.repository
            .update_password(user_id, password_hash)
            .await
            .map_err(|e| ChangePasswordError::StorageError(e.to_string()))?;

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }
}
