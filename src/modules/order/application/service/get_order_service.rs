use async_trait::async_trait;
use uuid::Uuid;

use crate::order::application::domain::entities::Order;
use crate::order::application::ports::incoming::use_cases::{
    GetOrderError, GetOrderUseCase, OrderViewer,
};
use crate::order::application::ports::outgoing::OrderQuery;

pub struct GetOrderService<Q>
where
    Q: OrderQuery,
{
    query: Q,
}

impl<Q> GetOrderService<Q>
where
    Q: OrderQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> GetOrderUseCase for GetOrderService<Q>
where
    Q: OrderQuery + Send + Sync,
{
    async fn execute(&self, order_id: Uuid, viewer: OrderViewer) -> Result<Order, GetOrderError> {
        self.query
            .find_by_id(order_id)
            .await?
            .filter(|order| viewer.can_see(order))
            .ok_or(GetOrderError::NotFound)
    }
}
