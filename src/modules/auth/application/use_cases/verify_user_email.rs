use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::application::ports::outgoing::{
    TokenError, TokenProvider, UserRepository, UserRepositoryError,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum VerifyUserEmailError {
    #[error("Verification token has expired")]
    TokenExpired,

    #[error("Invalid verification token")]
    TokenInvalid,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait IVerifyUserEmailUseCase: Send + Sync {
    async fn execute(&self, token: &str) -> Result<(), VerifyUserEmailError>;
}

#[derive(Clone)]
pub struct VerifyUserEmailUseCase {
    repository: Arc<dyn UserRepository>,
    token_provider: Arc<dyn TokenProvider>,
}

impl VerifyUserEmailUseCase {
    pub fn new(repository: Arc<dyn UserRepository>, token_provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            repository,
            token_provider,
        }
    }
}

#[async_trait]
impl IVerifyUserEmailUseCase for VerifyUserEmailUseCase {
    async fn execute(&self, token: &str) -> Result<(), VerifyUserEmailError> {
        let user_id = self
            .token_provider
            .verify_verification_token(token)
            .map_err(|e| match e {
                TokenError::TokenExpired => VerifyUserEmailError::TokenExpired,
                _ => VerifyUserEmailError::TokenInvalid,
            })?;

        self.repository
            .activate_user(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => VerifyUserEmailError::UserNotFound,
                other => VerifyUserEmailError::DatabaseError(other.to_string()),
            })?;

        tracing::info!(user_id = %user_id, "Email verified");
        Ok(())
    }
}
