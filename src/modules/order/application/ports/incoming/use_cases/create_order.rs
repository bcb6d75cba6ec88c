use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::order::application::domain::checkout::NewOrderRequest;
use crate::order::application::domain::entities::Order;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateOrderError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Product {0} not found")]
    ProductNotFound(Uuid),

    #[error("Insufficient stock for product {0}")]
    InsufficientStock(Uuid),

    #[error("User not found")]
    UserNotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreateOrderUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: UserId,
        request: NewOrderRequest,
    ) -> Result<Order, CreateOrderError>;
}
