use async_trait::async_trait;
use tracing::info;

use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::domain::product_rules::NewProduct;
use crate::catalog::application::ports::incoming::use_cases::{
    CreateProductError, CreateProductUseCase,
};
use crate::catalog::application::ports::outgoing::ProductRepository;

pub struct CreateProductService<R>
where
    R: ProductRepository,
{
    repository: R,
}

impl<R> CreateProductService<R>
where
    R: ProductRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> CreateProductUseCase for CreateProductService<R>
where
    R: ProductRepository + Send + Sync,
{
    async fn execute(&self, product: NewProduct) -> Result<Product, CreateProductError> {
        let product = product
            .validate()
            .map_err(|e| CreateProductError::InvalidInput(e.to_string()))?;

        let created = self
            .repository
            .create_product(product)
            .await
            .map_err(|e| CreateProductError::RepositoryError(e.to_string()))?;

        info!(product_id = %created.id, "Product created");
        Ok(created)
    }
}
