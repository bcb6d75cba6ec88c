use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::email::application::ports::outgoing::{
    EmailRecipient, EmailSendError, EmailSender, OrderEmailNotifier, OrderNotificationError,
    UserEmailNotificationError, UserEmailNotifier,
};
use crate::order::application::domain::entities::Order;
use crate::shared::app_urls::AppUrls;
use async_trait::async_trait;
use email_address::EmailAddress;
use std::fmt;
use std::sync::Arc;

use super::templates::{self, Rendered};

/// Renders transactional mail and hands it to the configured [`EmailSender`].
#[derive(Clone)]
pub struct EmailService {
    sender: Arc<dyn EmailSender + Send + Sync>,
    tokens: Arc<dyn TokenProvider + Send + Sync>,
    urls: AppUrls,
}

impl fmt::Debug for EmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("urls", &self.urls)
            .finish()
    }
}

impl EmailService {
    pub fn new(
        sender: Arc<dyn EmailSender + Send + Sync>,
        tokens: Arc<dyn TokenProvider + Send + Sync>,
        urls: AppUrls,
    ) -> Self {
        Self {
            sender,
            tokens,
            urls,
        }
    }

    async fn deliver(
        &self,
        to: &str,
        mail: Result<Rendered, EmailSendError>,
    ) -> Result<(), EmailSendError> {
        if !EmailAddress::is_valid(to) {
            return Err(EmailSendError::InvalidAddress(to.to_string()));
        }
        let mail = mail?;
        self.sender.send_email(to, &mail.subject, &mail.html).await
    }

    async fn deliver_order_mail(
        &self,
        order: &Order,
        render: fn(&Order, &str) -> Result<Rendered, EmailSendError>,
    ) -> Result<(), OrderNotificationError> {
        let mail = render(order, &self.urls.order_link(order.id));
        self.deliver(&order.contact_email, mail).await.map_err(|e| {
            tracing::warn!(order_id = %order.id, error = %e, "Order email not sent");
            OrderNotificationError::EmailSendingFailed(e.to_string())
        })
    }
}

#[async_trait]
impl UserEmailNotifier for EmailService {
    async fn send_verification_email(
        &self,
        recipient: &EmailRecipient,
    ) -> Result<(), UserEmailNotificationError> {
        let token = self
            .tokens
            .generate_verification_token(recipient.user_id)
            .map_err(|e| UserEmailNotificationError::TokenGenerationFailed(e.to_string()))?;

        let mail = templates::verification(&recipient.name, &self.urls.verification_link(&token));
        self.deliver(&recipient.email, mail)
            .await
            .map_err(|e| UserEmailNotificationError::EmailSendingFailed(e.to_string()))?;

        tracing::info!(user_id = %recipient.user_id, "Verification email sent");
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        recipient: &EmailRecipient,
        reset_token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        let mail = templates::password_reset(
            &recipient.name,
            &self.urls.password_reset_link(reset_token),
        );
        self.deliver(&recipient.email, mail)
            .await
            .map_err(|e| UserEmailNotificationError::EmailSendingFailed(e.to_string()))?;

        tracing::info!(user_id = %recipient.user_id, "Password reset email sent");
        Ok(())
    }
}

#[async_trait]
impl OrderEmailNotifier for EmailService {
    async fn send_status_changed(&self, order: &Order) -> Result<(), OrderNotificationError> {
        self.deliver_order_mail(order, templates::status_changed).await
    }

    async fn send_refund_pending(&self, order: &Order) -> Result<(), OrderNotificationError> {
        self.deliver_order_mail(order, templates::refund_pending).await
    }

    async fn send_refund_completed(&self, order: &Order) -> Result<(), OrderNotificationError> {
        self.deliver_order_mail(order, templates::refund_completed).await
    }
}
