use async_trait::async_trait;
use uuid::Uuid;

use crate::review::application::domain::entities::ProductReviews;
use crate::shared::pagination::PageRequest;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListProductReviewsError {
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait ListProductReviewsUseCase: Send + Sync {
    async fn execute(
        &self,
        product_id: Uuid,
        page: PageRequest,
    ) -> Result<ProductReviews, ListProductReviewsError>;
}
