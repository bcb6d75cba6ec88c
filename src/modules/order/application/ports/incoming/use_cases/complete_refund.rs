use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::order::application::domain::entities::Order;
use crate::order::application::ports::outgoing::{OrderQueryError, OrderRepositoryError};

#[derive(Debug, Clone, thiserror::Error)]
pub enum CompleteRefundError {
    #[error("Order not found")]
    NotFound,

    #[error("No refund is pending for this order")]
    RefundNotPending,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<OrderRepositoryError> for CompleteRefundError {
    fn from(err: OrderRepositoryError) -> Self {
        match err {
            OrderRepositoryError::NotFound => CompleteRefundError::NotFound,
            OrderRepositoryError::RefundNotPending => CompleteRefundError::RefundNotPending,
            other => CompleteRefundError::RepositoryError(other.to_string()),
        }
    }
}

impl From<OrderQueryError> for CompleteRefundError {
    fn from(err: OrderQueryError) -> Self {
        CompleteRefundError::RepositoryError(err.to_string())
    }
}

#[async_trait]
pub trait CompleteRefundUseCase: Send + Sync {
    async fn execute(&self, order_id: Uuid, admin: UserId) -> Result<Order, CompleteRefundError>;
}
