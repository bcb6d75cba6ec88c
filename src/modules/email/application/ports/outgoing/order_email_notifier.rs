use crate::order::application::domain::entities::Order;

#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderNotificationError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

/// Customer-facing mail about an order. The recipient is the order's contact email.
#[async_trait::async_trait]
pub trait OrderEmailNotifier: Send + Sync {
    async fn send_status_changed(&self, order: &Order) -> Result<(), OrderNotificationError>;

    async fn send_refund_pending(&self, order: &Order) -> Result<(), OrderNotificationError>;

    async fn send_refund_completed(&self, order: &Order) -> Result<(), OrderNotificationError>;
}
