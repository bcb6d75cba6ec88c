mod create_review_service;
mod list_product_reviews_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use create_review_service::CreateReviewService;
pub use list_product_reviews_service::ListProductReviewsService;
