use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::order::application::ports::incoming::use_cases::OrderPaymentError;
use crate::payment::application::domain::entities::{PaymentLink, PaymentProvider};
use crate::payment::application::ports::outgoing::PaymentGatewayError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreatePaymentError {
    #[error("Order not found")]
    OrderNotFound,

    #[error("Order cannot be paid: {0}")]
    NotPayable(String),

    #[error("Order was placed with a different payment method")]
    ProviderMismatch,

    #[error("Payment provider {0} is not configured")]
    ProviderUnavailable(PaymentProvider),

    #[error("Payment gateway error: {0}")]
    GatewayFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<OrderPaymentError> for CreatePaymentError {
    fn from(err: OrderPaymentError) -> Self {
        match err {
            OrderPaymentError::NotFound => CreatePaymentError::OrderNotFound,
            other => CreatePaymentError::RepositoryError(other.to_string()),
        }
    }
}

impl From<PaymentGatewayError> for CreatePaymentError {
    fn from(err: PaymentGatewayError) -> Self {
        CreatePaymentError::GatewayFailed(err.to_string())
    }
}

#[async_trait]
pub trait CreatePaymentUseCase: Send + Sync {
    async fn execute(
        &self,
        order_id: Uuid,
        user_id: UserId,
        provider: PaymentProvider,
    ) -> Result<PaymentLink, CreatePaymentError>;
}
