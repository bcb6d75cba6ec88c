use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseBackend, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Statement, Value,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::order::adapter::outgoing::sea_orm_entity::orders::{self, Column, Entity};
use crate::order::adapter::outgoing::sea_orm_entity::payment_attempts;
use crate::order::application::domain::entities::{Order, OrderListFilter, OrderStatus};
use crate::order::application::domain::stats::{
    MonthlyRevenue, OrderStats, StatsRange, StatusCount, TopProduct,
};
use crate::order::application::ports::outgoing::{OrderQuery, OrderQueryError};
use crate::shared::pagination::{PageRequest, PageResult};

const TOP_PRODUCTS_LIMIT: i64 = 10;

// $1 / $2 are the optional inclusive bounds on created_at.
const RANGE_CLAUSE: &str =
    "($1::timestamptz IS NULL OR created_at >= $1) AND ($2::timestamptz IS NULL OR created_at <= $2)";

#[derive(Debug, FromQueryResult)]
struct StatusRow {
    status: String,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct RevenueRow {
    revenue: i64,
}

#[derive(Debug, FromQueryResult)]
struct MonthRow {
    month: String,
    revenue: i64,
}

#[derive(Debug, FromQueryResult)]
struct TopProductRow {
    product_id: Uuid,
    product_name: String,
    quantity: i64,
}

#[derive(Clone)]
pub struct OrderQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl OrderQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn statement(sql: String, range: &StatsRange, extra: Vec<Value>) -> Statement {
        let mut values: Vec<Value> = vec![range.from.into(), range.to.into()];
        values.extend(extra);
        Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, values)
    }
}

#[async_trait]
impl OrderQuery for OrderQueryPostgres {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, OrderQueryError> {
        Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(to_order)
            .transpose()
    }

    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Order>, OrderQueryError> {
        let attempt = payment_attempts::Entity::find_by_id(reference.to_string())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        match attempt {
            Some(attempt) => self.find_by_id(attempt.order_id).await,
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        filter: OrderListFilter,
        page: PageRequest,
    ) -> Result<PageResult<Order>, OrderQueryError> {
        let mut query = Entity::find();
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(Column::UserId.eq(user_id));
        }

        let total = query.clone().count(&*self.db).await.map_err(map_db_err)?;

        let models = query
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let items = models
            .into_iter()
            .map(to_order)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageResult::new(items, page, total))
    }

    async fn stats(&self, range: StatsRange) -> Result<OrderStats, OrderQueryError> {
        let delivered = OrderStatus::Delivered.as_str();

        let status_rows = StatusRow::find_by_statement(Self::statement(
            format!(
                "SELECT status, COUNT(*)::bigint AS count FROM orders \
                 WHERE {RANGE_CLAUSE} GROUP BY status ORDER BY status"
            ),
            &range,
            vec![],
        ))
        .all(&*self.db)
        .await
        .map_err(map_db_err)?;

        let revenue = RevenueRow::find_by_statement(Self::statement(
            format!(
                "SELECT COALESCE(SUM(total), 0)::bigint AS revenue FROM orders \
                 WHERE status = $3 AND {RANGE_CLAUSE}"
            ),
            &range,
            vec![delivered.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(map_db_err)?
        .map_or(0, |row| row.revenue);

        let months = MonthRow::find_by_statement(Self::statement(
            format!(
                "SELECT to_char(date_trunc('month', created_at), 'YYYY-MM') AS month, \
                 SUM(total)::bigint AS revenue FROM orders \
                 WHERE status = $3 AND {RANGE_CLAUSE} GROUP BY 1 ORDER BY 1"
            ),
            &range,
            vec![delivered.into()],
        ))
        .all(&*self.db)
        .await
        .map_err(map_db_err)?;

        let top = TopProductRow::find_by_statement(Self::statement(
            format!(
                "SELECT (item->>'product_id')::uuid AS product_id, \
                 MAX(item->>'product_name') AS product_name, \
                 SUM((item->>'quantity')::bigint)::bigint AS quantity \
                 FROM orders, jsonb_array_elements(items) AS item \
                 WHERE status = $3 AND {RANGE_CLAUSE} \
                 GROUP BY 1 ORDER BY quantity DESC, product_name LIMIT $4"
            ),
            &range,
            vec![delivered.into(), TOP_PRODUCTS_LIMIT.into()],
        ))
        .all(&*self.db)
        .await
        .map_err(map_db_err)?;

        let status_counts = status_rows
            .into_iter()
            .map(|row| {
                OrderStatus::parse(&row.status)
                    .map(|status| StatusCount {
                        status,
                        count: row.count,
                    })
                    .ok_or_else(|| {
                        OrderQueryError::SerializationError(format!(
                            "unknown status '{}'",
                            row.status
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OrderStats {
            status_counts,
            delivered_revenue: revenue,
            monthly_revenue: months
                .into_iter()
                .map(|row| MonthlyRevenue {
                    month: row.month,
                    revenue: row.revenue,
                })
                .collect(),
            top_products: top
                .into_iter()
                .map(|row| TopProduct {
                    product_id: row.product_id,
                    product_name: row.product_name,
                    quantity: row.quantity,
                })
                .collect(),
        })
    }
}

fn to_order(model: orders::Model) -> Result<Order, OrderQueryError> {
    Order::try_from(model).map_err(OrderQueryError::SerializationError)
}

fn map_db_err(e: DbErr) -> OrderQueryError {
    OrderQueryError::DatabaseError(e.to_string())
}
