use async_trait::async_trait;

use crate::order::application::domain::stats::{OrderStats, StatsRange};
use crate::order::application::ports::incoming::use_cases::{OrderStatsError, OrderStatsUseCase};
use crate::order::application::ports::outgoing::OrderQuery;

pub struct OrderStatsService<Q>
where
    Q: OrderQuery,
{
    query: Q,
}

impl<Q> OrderStatsService<Q>
where
    Q: OrderQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> OrderStatsUseCase for OrderStatsService<Q>
where
    Q: OrderQuery + Send + Sync,
{
    async fn execute(&self, range: StatsRange) -> Result<OrderStats, OrderStatsError> {
        if !range.is_valid() {
            return Err(OrderStatsError::InvalidRange);
        }
        Ok(self.query.stats(range).await?)
    }
}
