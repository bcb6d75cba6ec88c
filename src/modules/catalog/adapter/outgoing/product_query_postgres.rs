use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::catalog::adapter::outgoing::sea_orm_entity::products::{self, Column, Entity};
use crate::catalog::application::domain::entities::{Product, ProductListFilter, ProductSort};
use crate::catalog::application::ports::outgoing::{ProductQuery, ProductQueryError};
use crate::shared::db::contains_pattern;
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Clone)]
pub struct ProductQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProductQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn visible() -> Select<Entity> {
    Entity::find().filter(Column::IsDeleted.eq(false))
}

fn apply_filter(mut query: Select<Entity>, filter: &ProductListFilter) -> Select<Entity> {
    if let Some(ref search) = filter.search {
        let pattern = contains_pattern(search.trim());
        query = query.filter(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }
    if let Some(ref category) = filter.category {
        query = query.filter(Column::Category.eq(category.trim()));
    }
    if let Some(ref product_type) = filter.product_type {
        query = query.filter(Column::ProductType.eq(product_type.trim()));
    }
    if let Some(min) = filter.min_price {
        query = query.filter(Column::Price.gte(min));
    }
    if let Some(max) = filter.max_price {
        query = query.filter(Column::Price.lte(max));
    }
    if filter.in_stock {
        query = query.filter(Column::Stock.gt(0));
    }
    query
}

fn apply_sort(query: Select<Entity>, sort: ProductSort) -> Select<Entity> {
    match sort {
        ProductSort::Newest => query.order_by_desc(Column::CreatedAt),
        ProductSort::PriceAsc => query.order_by_asc(Column::Price),
        ProductSort::PriceDesc => query.order_by_desc(Column::Price),
        ProductSort::NameAsc => query.order_by_asc(Column::Name),
    }
    .order_by_asc(Column::Id)
}

#[async_trait]
impl ProductQuery for ProductQueryPostgres {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ProductQueryError> {
        visible()
            .filter(Column::Id.eq(id))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(to_product)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, ProductQueryError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        visible()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(to_product)
            .collect()
    }

    async fn list(
        &self,
        filter: ProductListFilter,
        sort: ProductSort,
        page: PageRequest,
    ) -> Result<PageResult<Product>, ProductQueryError> {
        let query = apply_filter(visible(), &filter);

        let total = query.clone().count(&*self.db).await.map_err(map_db_err)?;

        let models = apply_sort(query, sort)
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let items = models
            .into_iter()
            .map(to_product)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageResult::new(items, page, total))
    }

    async fn categories(&self) -> Result<Vec<String>, ProductQueryError> {
        visible()
            .select_only()
            .column(Column::Category)
            .distinct()
            .order_by_asc(Column::Category)
            .into_tuple::<String>()
            .all(&*self.db)
            .await
            .map_err(map_db_err)
    }
}

fn to_product(model: products::Model) -> Result<Product, ProductQueryError> {
    Product::try_from(model).map_err(|e| ProductQueryError::SerializationError(e.to_string()))
}

fn map_db_err(e: DbErr) -> ProductQueryError {
    ProductQueryError::DatabaseError(e.to_string())
}
