use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::domain::product_rules::ProductPatch;
use crate::catalog::application::ports::incoming::use_cases::{
    UpdateProductError, UpdateProductUseCase,
};
use crate::catalog::application::ports::outgoing::{ProductRepository, ProductRepositoryError};

pub struct UpdateProductService<R>
where
    R: ProductRepository,
{
    repository: R,
}

impl<R> UpdateProductService<R>
where
    R: ProductRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> UpdateProductUseCase for UpdateProductService<R>
where
    R: ProductRepository + Send + Sync,
{
    async fn execute(&self, id: Uuid, patch: ProductPatch) -> Result<Product, UpdateProductError> {
        let patch = patch
            .validate()
            .map_err(|e| UpdateProductError::InvalidInput(e.to_string()))?;

        self.repository
            .update_product(id, patch)
            .await
            .map_err(|e| match e {
                ProductRepositoryError::NotFound => UpdateProductError::NotFound,
                other => UpdateProductError::RepositoryError(other.to_string()),
            })
    }
}
