use async_trait::async_trait;

use crate::order::application::domain::stats::{OrderStats, StatsRange};
use crate::order::application::ports::outgoing::OrderQueryError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderStatsError {
    #[error("`from` must not be after `to`")]
    InvalidRange,

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<OrderQueryError> for OrderStatsError {
    fn from(err: OrderQueryError) -> Self {
        OrderStatsError::QueryFailed(err.to_string())
    }
}

#[async_trait]
pub trait OrderStatsUseCase: Send + Sync {
    async fn execute(&self, range: StatsRange) -> Result<OrderStats, OrderStatsError>;
}
