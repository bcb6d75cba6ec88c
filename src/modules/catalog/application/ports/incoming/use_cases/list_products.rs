use async_trait::async_trait;

use crate::catalog::application::domain::entities::{Product, ProductListFilter, ProductSort};
use crate::catalog::application::ports::outgoing::ProductQueryError;
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListProductsError {
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<ProductQueryError> for ListProductsError {
    fn from(err: ProductQueryError) -> Self {
        match err {
            ProductQueryError::DatabaseError(msg) | ProductQueryError::SerializationError(msg) => {
                ListProductsError::QueryFailed(msg)
            }
        }
    }
}

#[async_trait]
pub trait ListProductsUseCase: Send + Sync {
    async fn execute(
        &self,
        filter: ProductListFilter,
        sort: ProductSort,
        page: PageRequest,
    ) -> Result<PageResult<Product>, ListProductsError>;
}
