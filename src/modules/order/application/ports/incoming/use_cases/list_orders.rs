use async_trait::async_trait;

use crate::order::application::domain::entities::{Order, OrderListFilter};
use crate::order::application::ports::outgoing::OrderQueryError;
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListOrdersError {
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<OrderQueryError> for ListOrdersError {
    fn from(err: OrderQueryError) -> Self {
        ListOrdersError::QueryFailed(err.to_string())
    }
}

#[async_trait]
pub trait ListOrdersUseCase: Send + Sync {
    async fn execute(
        &self,
        filter: OrderListFilter,
        page: PageRequest,
    ) -> Result<PageResult<Order>, ListOrdersError>;
}
