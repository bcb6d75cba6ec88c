use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::order::application::domain::entities::Order;
use crate::order::application::ports::outgoing::OrderQueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderViewer {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl OrderViewer {
    pub fn can_see(&self, order: &Order) -> bool {
        self.is_admin || order.is_owned_by(self.user_id.value())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetOrderError {
    /// Also returned for orders the viewer may not see.
    #[error("Order not found")]
    NotFound,

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<OrderQueryError> for GetOrderError {
    fn from(err: OrderQueryError) -> Self {
        GetOrderError::QueryFailed(err.to_string())
    }
}

#[async_trait]
pub trait GetOrderUseCase: Send + Sync {
    async fn execute(&self, order_id: Uuid, viewer: OrderViewer) -> Result<Order, GetOrderError>;
}
