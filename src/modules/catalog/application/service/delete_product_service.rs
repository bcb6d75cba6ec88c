use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::catalog::application::ports::incoming::use_cases::{
    DeleteProductError, DeleteProductUseCase,
};
use crate::catalog::application::ports::outgoing::{ProductRepository, ProductRepositoryError};

pub struct DeleteProductService<R>
where
    R: ProductRepository,
{
    repository: R,
}

impl<R> DeleteProductService<R>
where
    R: ProductRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> DeleteProductUseCase for DeleteProductService<R>
where
    R: ProductRepository + Send + Sync,
{
    async fn execute(&self, id: Uuid) -> Result<(), DeleteProductError> {
        self.repository
            .soft_delete_product(id)
            .await
            .map_err(|e| match e {
                ProductRepositoryError::NotFound => DeleteProductError::NotFound,
                other => DeleteProductError::RepositoryError(other.to_string()),
            })?;

        info!(product_id = %id, "Product soft-deleted");
        Ok(())
    }
}
