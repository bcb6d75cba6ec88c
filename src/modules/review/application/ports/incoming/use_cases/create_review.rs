use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::review::application::domain::entities::{NewReview, Review};

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateReviewError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Order not found")]
    OrderNotFound,

    #[error("Only delivered orders can be reviewed")]
    NotDelivered,

    #[error("Product is not part of this order")]
    ProductNotInOrder,

    #[error("Product already reviewed for this order")]
    AlreadyReviewed,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreateReviewUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId, review: NewReview) -> Result<Review, CreateReviewError>;
}
