use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::domain::product_rules::ProductPatch;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdateProductError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Product not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait UpdateProductUseCase: Send + Sync {
    async fn execute(&self, id: Uuid, patch: ProductPatch) -> Result<Product, UpdateProductError>;
}
