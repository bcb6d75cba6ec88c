mod create_review;
mod list_product_reviews;

pub use create_review::{CreateReviewError, CreateReviewUseCase};
pub use list_product_reviews::{ListProductReviewsError, ListProductReviewsUseCase};
