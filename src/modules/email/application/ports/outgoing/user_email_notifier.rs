use crate::auth::application::domain::entities::{User, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRecipient {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&User> for EmailRecipient {
    fn from(user: &User) -> Self {
        Self {
            user_id: UserId::from(user.id),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserEmailNotificationError {
    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

#[async_trait::async_trait]
pub trait UserEmailNotifier: Send + Sync {
    async fn send_verification_email(
        &self,
        recipient: &EmailRecipient,
    ) -> Result<(), UserEmailNotificationError>;

    async fn send_password_reset_email(
        &self,
        recipient: &EmailRecipient,
        reset_token: &str,
    ) -> Result<(), UserEmailNotificationError>;
}
