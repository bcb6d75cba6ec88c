use async_trait::async_trait;
use uuid::Uuid;

use crate::order::application::domain::entities::{Order, OrderListFilter};
use crate::order::application::domain::stats::{OrderStats, StatsRange};
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Stored order is malformed: {0}")]
    SerializationError(String),
}

#[async_trait]
pub trait OrderQuery: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, OrderQueryError>;

    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Order>, OrderQueryError>;

    /// Newest first.
    async fn list(
        &self,
        filter: OrderListFilter,
        page: PageRequest,
    ) -> Result<PageResult<Order>, OrderQueryError>;

    async fn stats(&self, range: StatsRange) -> Result<OrderStats, OrderQueryError>;
}
