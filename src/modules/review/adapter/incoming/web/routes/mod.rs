mod create_review;
mod list_product_reviews;

pub use create_review::*;
pub use list_product_reviews::*;
