use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::review::adapter::outgoing::sea_orm_entity::reviews::{Column, Entity};
use crate::review::application::domain::entities::{RatingSummary, Review};
use crate::review::application::ports::outgoing::{ReviewQuery, ReviewQueryError};
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Debug, FromQueryResult)]
struct Totals {
    rating_sum: Option<i64>,
    review_count: i64,
}

#[derive(Clone)]
pub struct ReviewQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ReviewQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewQuery for ReviewQueryPostgres {
    async fn list_for_product(
        &self,
        product_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<Review>, ReviewQueryError> {
        let query = Entity::find().filter(Column::ProductId.eq(product_id));

        let total = query.clone().count(&*self.db).await.map_err(map_db_err)?;

        let items = query
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(Review::from)
            .collect();

        Ok(PageResult::new(items, page, total))
    }

    async fn summary(&self, product_id: Uuid) -> Result<RatingSummary, ReviewQueryError> {
        let totals = Entity::find()
            .select_only()
            .column_as(Column::Rating.sum(), "rating_sum")
            .column_as(Column::Id.count(), "review_count")
            .filter(Column::ProductId.eq(product_id))
            .into_model::<Totals>()
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(match totals {
            Some(t) => RatingSummary::from_totals(t.rating_sum.unwrap_or(0), t.review_count),
            None => RatingSummary::default(),
        })
    }
}

fn map_db_err(e: DbErr) -> ReviewQueryError {
    ReviewQueryError::DatabaseError(e.to_string())
}
