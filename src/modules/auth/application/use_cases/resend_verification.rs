use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::application::ports::outgoing::UserQuery;
use crate::email::application::ports::outgoing::{EmailRecipient, UserEmailNotifier};
use crate::shared::background::{spawn_with_retry, DEFAULT_MAX_ATTEMPTS};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResendVerificationError {
    #[error("Query error: {0}")]
    QueryError(String),
}

/// Always answers the same way whether or not the address is registered.
#[async_trait]
pub trait IResendVerificationUseCase: Send + Sync {
    async fn execute(&self, email: &str) -> Result<(), ResendVerificationError>;
}

#[derive(Clone)]
pub struct ResendVerificationUseCase {
    query: Arc<dyn UserQuery>,
    notifier: Arc<dyn UserEmailNotifier>,
}

impl ResendVerificationUseCase {
    pub fn new(query: Arc<dyn UserQuery>, notifier: Arc<dyn UserEmailNotifier>) -> Self {
        Self { query, notifier }
    }
}

#[async_trait]
impl IResendVerificationUseCase for ResendVerificationUseCase {
    async fn execute(&self, email: &str) -> Result<(), ResendVerificationError> {
        let email = email.trim().to_lowercase();
        let user = self
            .query
            .find_by_email(&email)
            .await
            .map_err(|e| ResendVerificationError::QueryError(e.to_string()))?;

        let Some(user) = user.filter(|u| !u.is_deleted && !u.is_verified) else {
            tracing::debug!("Resend verification skipped: no pending account");
            return Ok(());
        };

        let notifier = self.notifier.clone();
        let recipient = EmailRecipient::from(&user);
        spawn_with_retry("verification email", DEFAULT_MAX_ATTEMPTS, move || {
            let notifier = notifier.clone();
            let recipient = recipient.clone();
            async move { notifier.send_verification_email(&recipient).await }
        });

        Ok(())
    }
}
