use async_trait::async_trait;

use crate::order::application::domain::entities::{Order, OrderListFilter};
use crate::order::application::ports::incoming::use_cases::{ListOrdersError, ListOrdersUseCase};
use crate::order::application::ports::outgoing::OrderQuery;
use crate::shared::pagination::{PageRequest, PageResult};

pub struct ListOrdersService<Q>
where
    Q: OrderQuery,
{
    query: Q,
}

impl<Q> ListOrdersService<Q>
where
    Q: OrderQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListOrdersUseCase for ListOrdersService<Q>
where
    Q: OrderQuery + Send + Sync,
{
    async fn execute(
        &self,
        filter: OrderListFilter,
        page: PageRequest,
    ) -> Result<PageResult<Order>, ListOrdersError> {
        Ok(self.query.list(filter, page).await?)
    }
}
