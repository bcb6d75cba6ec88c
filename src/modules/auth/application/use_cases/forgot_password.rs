use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::helpers::opaque_token::{generate_opaque_token, hash_token};
use crate::auth::application::ports::outgoing::{UserQuery, UserRepository};
use crate::email::application::ports::outgoing::{EmailRecipient, UserEmailNotifier};
use crate::shared::background::{spawn_with_retry, DEFAULT_MAX_ATTEMPTS};

pub const RESET_TOKEN_TTL_MINUTES: i64 = 60;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

#[async_trait]
pub trait IForgotPasswordUseCase: Send + Sync {
    async fn execute(&self, email: &str) -> Result<(), ForgotPasswordError>;
}

#[derive(Clone)]
pub struct ForgotPasswordUseCase {
    query: Arc<dyn UserQuery>,
    repository: Arc<dyn UserRepository>,
    notifier: Arc<dyn UserEmailNotifier>,
}

impl ForgotPasswordUseCase {
    pub fn new(
        query: Arc<dyn UserQuery>,
        repository: Arc<dyn UserRepository>,
        notifier: Arc<dyn UserEmailNotifier>,
    ) -> Self {
        Self {
            query,
            repository,
            notifier,
        }
    }
}

#[async_trait]
impl IForgotPasswordUseCase for ForgotPasswordUseCase {
    async fn execute(&self, email: &str) -> Result<(), ForgotPasswordError> {
        let email = email.trim().to_lowercase();
        let user = self
            .query
            .find_by_email(&email)
            .await
            .map_err(|e| ForgotPasswordError::StorageError(e.to_string()))?;

        let Some(user) = user.filter(|u| !u.is_deleted) else {
            tracing::debug!("Password reset requested for unknown address");
            return Ok(());
        };

        let token = generate_opaque_token();
        let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);
        self.repository
            .set_reset_token(UserId::from(user.id), hash_token(&token), expires_at)
            .await
            .map_err(|e| ForgotPasswordError::StorageError(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Password reset token issued");

        let notifier = self.notifier.clone();
        let recipient = EmailRecipient::from(&user);
        spawn_with_retry("password reset email", DEFAULT_MAX_ATTEMPTS, move || {
            let notifier = notifier.clone();
            let recipient = recipient.clone();
            let token = token.clone();
            async move { notifier.send_password_reset_email(&recipient, &token).await }
        });

        Ok(())
    }
}
