use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::application::domain::entities::Product;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetProductError {
    #[error("Product not found")]
    NotFound,

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait GetProductUseCase: Send + Sync {
    async fn execute(&self, id: Uuid) -> Result<Product, GetProductError>;
}
