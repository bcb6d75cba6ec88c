use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::review::adapter::outgoing::sea_orm_entity::reviews::ActiveModel;
use crate::review::application::domain::entities::{NewReview, Review};
use crate::review::application::ports::outgoing::{ReviewRepository, ReviewRepositoryError};
use crate::shared::db::is_unique_violation;

#[derive(Clone)]
pub struct ReviewRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ReviewRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for ReviewRepositoryPostgres {
    async fn insert_review(
        &self,
        user_id: Uuid,
        review: NewReview,
    ) -> Result<Review, ReviewRepositoryError> {
        let active = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            order_id: Set(review.order_id),
            product_id: Set(review.product_id),
            rating: Set(review.rating),
            comment: Set(review.comment),
            created_at: NotSet,
        };

        match active.insert(&*self.db).await {
            Ok(model) => Ok(model.into()),
            Err(e) if is_unique_violation(&e) => Err(ReviewRepositoryError::Duplicate),
            Err(e) => Err(ReviewRepositoryError::DatabaseError(e.to_string())),
        }
    }
}
