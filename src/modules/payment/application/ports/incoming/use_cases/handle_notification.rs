use async_trait::async_trait;
use serde_json::Value;

use crate::order::application::ports::incoming::use_cases::OrderPaymentError;
use crate::payment::application::domain::entities::PaymentProvider;
use crate::payment::application::ports::outgoing::PaymentGatewayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    Paid,
    AlreadyPaid,
    Failed,
    AmountMismatch,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum HandleNotificationError {
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Malformed notification: {0}")]
    MalformedPayload(String),

    #[error("No order for payment reference")]
    UnknownReference,

    #[error("Payment provider {0} is not configured")]
    ProviderUnavailable(PaymentProvider),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<PaymentGatewayError> for HandleNotificationError {
    fn from(err: PaymentGatewayError) -> Self {
        match err {
            PaymentGatewayError::InvalidSignature => HandleNotificationError::InvalidSignature,
            other => HandleNotificationError::MalformedPayload(other.to_string()),
        }
    }
}

impl From<OrderPaymentError> for HandleNotificationError {
    fn from(err: OrderPaymentError) -> Self {
        match err {
            OrderPaymentError::NotFound => HandleNotificationError::UnknownReference,
            other => HandleNotificationError::RepositoryError(other.to_string()),
        }
    }
}

#[async_trait]
pub trait HandleNotificationUseCase: Send + Sync {
    async fn execute(
        &self,
        provider: PaymentProvider,
        payload: Value,
    ) -> Result<NotificationOutcome, HandleNotificationError>;
}
