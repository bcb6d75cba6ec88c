use std::sync::Arc;

use crate::review::application::ports::incoming::use_cases::{
    CreateReviewUseCase, ListProductReviewsUseCase,
};

#[derive(Clone)]
pub struct ReviewUseCases {
    pub create: Arc<dyn CreateReviewUseCase + Send + Sync>,
    pub list: Arc<dyn ListProductReviewsUseCase + Send + Sync>,
}
