use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::domain::product_rules::{NewProduct, ProductPatch};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProductRepositoryError {
    #[error("Product not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Inputs are expected to be validated already.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductRepositoryError>;

    async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, ProductRepositoryError>;

    async fn soft_delete_product(&self, id: Uuid) -> Result<(), ProductRepositoryError>;
}
