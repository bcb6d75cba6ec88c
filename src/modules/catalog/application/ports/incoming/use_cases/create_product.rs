use async_trait::async_trait;

use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::domain::product_rules::NewProduct;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateProductError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreateProductUseCase: Send + Sync {
    async fn execute(&self, product: NewProduct) -> Result<Product, CreateProductError>;
}
