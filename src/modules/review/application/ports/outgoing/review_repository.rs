use async_trait::async_trait;
use uuid::Uuid;

use crate::review::application::domain::entities::{NewReview, Review};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewRepositoryError {
    #[error("Product already reviewed for this order")]
    Duplicate,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Fails with `Duplicate` when the (order, product) pair is already reviewed.
    async fn insert_review(
        &self,
        user_id: Uuid,
        review: NewReview,
    ) -> Result<Review, ReviewRepositoryError>;
}
