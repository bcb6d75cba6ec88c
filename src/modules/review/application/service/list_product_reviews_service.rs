use async_trait::async_trait;
use uuid::Uuid;

use crate::review::application::domain::entities::ProductReviews;
use crate::review::application::ports::incoming::use_cases::{
    ListProductReviewsError, ListProductReviewsUseCase,
};
use crate::review::application::ports::outgoing::{ReviewQuery, ReviewQueryError};
use crate::shared::pagination::PageRequest;

pub struct ListProductReviewsService<Q>
where
    Q: ReviewQuery,
{
    query: Q,
}

impl<Q> ListProductReviewsService<Q>
where
    Q: ReviewQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListProductReviewsUseCase for ListProductReviewsService<Q>
where
    Q: ReviewQuery + Send + Sync,
{
    async fn execute(
        &self,
        product_id: Uuid,
        page: PageRequest,
    ) -> Result<ProductReviews, ListProductReviewsError> {
        let failed = |e: ReviewQueryError| {
            ListProductReviewsError::QueryFailed(e.to_string())
        };

        let summary = self.query.summary(product_id).await.map_err(failed)?;
        let reviews = self
            .query
            .list_for_product(product_id, page)
            .await
            .map_err(failed)?;

        Ok(ProductReviews { summary, reviews })
    }
}
