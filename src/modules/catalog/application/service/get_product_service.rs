use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::ports::incoming::use_cases::{
    GetProductError, GetProductUseCase,
};
use crate::catalog::application::ports::outgoing::ProductQuery;

pub struct GetProductService<Q>
where
    Q: ProductQuery,
{
    query: Q,
}

impl<Q> GetProductService<Q>
where
    Q: ProductQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> GetProductUseCase for GetProductService<Q>
where
    Q: ProductQuery + Send + Sync,
{
    async fn execute(&self, id: Uuid) -> Result<Product, GetProductError> {
        self.query
            .find_by_id(id)
            .await
            .map_err(|e| GetProductError::QueryFailed(e.to_string()))?
            .ok_or(GetProductError::NotFound)
    }
}
