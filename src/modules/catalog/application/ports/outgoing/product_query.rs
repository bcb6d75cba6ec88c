use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::application::domain::entities::{Product, ProductListFilter, ProductSort};
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProductQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Read side of the catalog. Soft-deleted products are invisible here.
#[async_trait]
pub trait ProductQuery: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ProductQueryError>;

    /// Missing ids are skipped; the caller compares lengths.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, ProductQueryError>;

    async fn list(
        &self,
        filter: ProductListFilter,
        sort: ProductSort,
        page: PageRequest,
    ) -> Result<PageResult<Product>, ProductQueryError>;

    async fn categories(&self) -> Result<Vec<String>, ProductQueryError>;
}
