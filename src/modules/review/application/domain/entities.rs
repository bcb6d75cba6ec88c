use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::pagination::PageResult;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;
pub const COMMENT_MAX_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ReviewValidationError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct NewReview {
    pub order_id: Uuid,
    pub product_id: Uuid,
    #[schema(minimum = 1, maximum = 5)]
    pub rating: i16,
    #[serde(default)]
    pub comment: String,
}

impl NewReview {
    /// Trims the comment and checks rating bounds.
    pub fn validate(self) -> Result<Self, ReviewValidationError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ReviewValidationError(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        let comment = self.comment.trim().to_string();
        if comment.chars().count() > COMMENT_MAX_LEN {
            return Err(ReviewValidationError(format!(
                "Comment must be at most {COMMENT_MAX_LEN} characters"
            )));
        }
        Ok(Self { comment, ..self })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct RatingSummary {
    /// Mean rating rounded to one decimal, 0 when there are no reviews.
    pub average: f64,
    pub count: i64,
}

impl RatingSummary {
    pub fn from_totals(sum: i64, count: i64) -> Self {
        if count <= 0 {
            return Self::default();
        }
        let average = (sum as f64 / count as f64 * 10.0).round() / 10.0;
        Self { average, count }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductReviews {
    pub summary: RatingSummary,
    pub reviews: PageResult<Review>,
}

#[cfg(test)]
pub(crate) fn sample_review(product_id: Uuid, rating: i16) -> Review {
    Review {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        order_id: Uuid::new_v4(),
        product_id,
        rating,
        comment: "Fresh and beautiful".to_string(),
        created_at: Utc::now(),
    }
}
