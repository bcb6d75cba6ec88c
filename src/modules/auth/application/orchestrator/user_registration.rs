use std::sync::Arc;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::use_cases::create_user::{
    CreateUserError, CreateUserInput, CreateUserOutput, ICreateUserUseCase,
};
use crate::email::application::ports::outgoing::{EmailRecipient, UserEmailNotifier};
use crate::shared::background::{spawn_with_retry, DEFAULT_MAX_ATTEMPTS};

// ============================================================================
// Registration Output
// ============================================================================
#[derive(Debug)]
pub struct UserRegistrationOutput {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub message: String,
}

impl From<CreateUserOutput> for UserRegistrationOutput {
    fn from(output: CreateUserOutput) -> Self {
        Self {
            user_id: output.user_id,
            email: output.email,
            name: output.name,
            message: "Account created. Please check your email to verify your account."
                .to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UserRegistrationError {
    #[error("User creation failed: {0}")]
    CreateUserFailed(#[from] CreateUserError),
}

// ============================================================================
// Orchestration: create the account, then mail the verification link
// ============================================================================
#[derive(Clone)]
pub struct UserRegistrationOrchestrator {
    create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
    email_notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
}

impl UserRegistrationOrchestrator {
    pub fn new(
        create_user_use_case: Arc<dyn ICreateUserUseCase + Send + Sync>,
        email_notifier: Arc<dyn UserEmailNotifier + Send + Sync>,
    ) -> Self {
        Self {
            create_user_use_case,
            email_notifier,
        }
    }

    /// Returns as soon as the account exists; the email goes out in the background.
    pub async fn register_user(
        &self,
        input: CreateUserInput,
    ) -> Result<UserRegistrationOutput, UserRegistrationError> {
        let created_user = self.create_user_use_case.execute(input).await?;

        let notifier = self.email_notifier.clone();
        let recipient = EmailRecipient {
            user_id: created_user.user_id,
            name: created_user.name.clone(),
            email: created_user.email.clone(),
        };

        spawn_with_retry("verification email", DEFAULT_MAX_ATTEMPTS, move || {
            let notifier = notifier.clone();
            let recipient = recipient.clone();
            async move { notifier.send_verification_email(&recipient).await }
        });

        Ok(created_user.into())
    }
}
