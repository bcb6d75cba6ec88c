use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::auth::application::domain::entities::UserId;
use crate::order::application::domain::entities::OrderStatus;
use crate::order::application::ports::incoming::use_cases::{
    GetOrderError, GetOrderUseCase, OrderViewer,
};
use crate::review::application::domain::entities::{NewReview, Review};
use crate::review::application::ports::incoming::use_cases::{
    CreateReviewError, CreateReviewUseCase,
};
use crate::review::application::ports::outgoing::{ReviewRepository, ReviewRepositoryError};

pub struct CreateReviewService<R>
where
    R: ReviewRepository,
{
    repository: R,
    orders: Arc<dyn GetOrderUseCase + Send + Sync>,
}

impl<R> CreateReviewService<R>
where
    R: ReviewRepository,
{
    pub fn new(repository: R, orders: Arc<dyn GetOrderUseCase + Send + Sync>) -> Self {
        Self { repository, orders }
    }
}

#[async_trait]
impl<R> CreateReviewUseCase for CreateReviewService<R>
where
    R: ReviewRepository + Send + Sync,
{
    async fn execute(&self, user_id: UserId, review: NewReview) -> Result<Review, CreateReviewError> {
        let review = review
            .validate()
            .map_err(|e| CreateReviewError::InvalidInput(e.to_string()))?;

        let viewer = OrderViewer {
            user_id,
            is_admin: false,
        };
        let order = self
            .orders
            .execute(review.order_id, viewer)
            .await
            .map_err(|e| match e {
                GetOrderError::NotFound => CreateReviewError::OrderNotFound,
                other => CreateReviewError::RepositoryError(other.to_string()),
            })?;

        if order.status != OrderStatus::Delivered {
            return Err(CreateReviewError::NotDelivered);
        }
        if !order.contains_product(review.product_id) {
            return Err(CreateReviewError::ProductNotInOrder);
        }

        let created = self
            .repository
            .insert_review(user_id.value(), review)
            .await
            .map_err(|e| match e {
                ReviewRepositoryError::Duplicate => CreateReviewError::AlreadyReviewed,
                other => CreateReviewError::RepositoryError(other.to_string()),
            })?;

        info!(review_id = %created.id, product_id = %created.product_id, %user_id, "Review created");
        Ok(created)
    }
}
