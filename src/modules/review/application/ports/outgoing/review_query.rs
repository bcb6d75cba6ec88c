use async_trait::async_trait;
use uuid::Uuid;

use crate::review::application::domain::entities::{RatingSummary, Review};
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ReviewQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ReviewQuery: Send + Sync {
    /// Newest first.
    async fn list_for_product(
        &self,
        product_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<Review>, ReviewQueryError>;

    async fn summary(&self, product_id: Uuid) -> Result<RatingSummary, ReviewQueryError>;
}
