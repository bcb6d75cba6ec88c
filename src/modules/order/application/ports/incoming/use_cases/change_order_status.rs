use async_trait::async_trait;
use uuid::Uuid;

use crate::order::application::domain::entities::{Order, OrderStatus};
use crate::order::application::domain::transitions::{TransitionActor, TransitionError};
use crate::order::application::ports::outgoing::{OrderQueryError, OrderRepositoryError};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ChangeOrderStatusError {
    #[error("Order not found")]
    NotFound,

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Not allowed to move order to {0}")]
    NotAllowed(OrderStatus),

    #[error("Order status changed concurrently")]
    StatusConflict,

    #[error("Insufficient stock for product {0}")]
    InsufficientStock(Uuid),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<TransitionError> for ChangeOrderStatusError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::InvalidTransition { from, to } => {
                ChangeOrderStatusError::InvalidTransition { from, to }
            }
            TransitionError::NotAllowed(to) => ChangeOrderStatusError::NotAllowed(to),
        }
    }
}

impl From<OrderRepositoryError> for ChangeOrderStatusError {
    fn from(err: OrderRepositoryError) -> Self {
        match err {
            OrderRepositoryError::NotFound => ChangeOrderStatusError::NotFound,
            OrderRepositoryError::StatusConflict => ChangeOrderStatusError::StatusConflict,
            OrderRepositoryError::InsufficientStock(id) => {
                ChangeOrderStatusError::InsufficientStock(id)
            }
            other => ChangeOrderStatusError::RepositoryError(other.to_string()),
        }
    }
}

impl From<OrderQueryError> for ChangeOrderStatusError {
    fn from(err: OrderQueryError) -> Self {
        ChangeOrderStatusError::RepositoryError(err.to_string())
    }
}

#[async_trait]
pub trait ChangeOrderStatusUseCase: Send + Sync {
    async fn execute(
        &self,
        order_id: Uuid,
        actor: TransitionActor,
        next: OrderStatus,
    ) -> Result<Order, ChangeOrderStatusError>;
}
