use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::order::application::domain::entities::Order;
use crate::order::application::ports::incoming::use_cases::{
    GetOrderError, GetOrderUseCase, OrderViewer,
};
use crate::review::application::domain::entities::{NewReview, RatingSummary, Review};
use crate::review::application::ports::outgoing::{
    ReviewQuery, ReviewQueryError, ReviewRepository, ReviewRepositoryError,
};
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Clone, Default)]
pub struct InMemoryReviews {
    reviews: Arc<Mutex<Vec<Review>>>,
}

impl InMemoryReviews {
    pub fn with(reviews: Vec<Review>) -> Self {
        Self {
            reviews: Arc::new(Mutex::new(reviews)),
        }
    }

    pub fn all(&self) -> Vec<Review> {
        self.reviews.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviews {
    async fn insert_review(
        &self,
        user_id: Uuid,
        review: NewReview,
    ) -> Result<Review, ReviewRepositoryError> {
        let mut reviews = self.reviews.lock().unwrap();
        if reviews
            .iter()
            .any(|r| r.order_id == review.order_id && r.product_id == review.product_id)
        {
            return Err(ReviewRepositoryError::Duplicate);
        }
        let created = Review {
            id: Uuid::new_v4(),
            user_id,
            order_id: review.order_id,
            product_id: review.product_id,
            rating: review.rating,
            comment: review.comment,
            created_at: Utc::now(),
        };
        reviews.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl ReviewQuery for InMemoryReviews {
    async fn list_for_product(
        &self,
        product_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<Review>, ReviewQueryError> {
        let mut matching: Vec<Review> = self
            .all()
            .into_iter()
            .filter(|r| r.product_id == product_id)
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResult::new(items, page, total))
    }

    async fn summary(&self, product_id: Uuid) -> Result<RatingSummary, ReviewQueryError> {
        let ratings: Vec<i64> = self
            .all()
            .iter()
            .filter(|r| r.product_id == product_id)
            .map(|r| i64::from(r.rating))
            .collect();
        Ok(RatingSummary::from_totals(
            ratings.iter().sum(),
            ratings.len() as i64,
        ))
    }
}

/// Orders visible to their owner only.
pub struct OwnedOrders(pub Vec<Order>);

#[async_trait]
impl GetOrderUseCase for OwnedOrders {
    async fn execute(&self, order_id: Uuid, viewer: OrderViewer) -> Result<Order, GetOrderError> {
        self.0
            .iter()
            .find(|o| o.id == order_id && viewer.can_see(o))
            .cloned()
            .ok_or(GetOrderError::NotFound)
    }
}
