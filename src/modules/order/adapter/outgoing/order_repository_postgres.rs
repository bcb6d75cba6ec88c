use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::catalog::adapter::outgoing::sea_orm_entity::products;
use crate::order::adapter::outgoing::sea_orm_entity::orders::{self, ActiveModel, Entity};
use crate::order::adapter::outgoing::sea_orm_entity::payment_attempts;
use crate::order::application::domain::entities::{
    HistoryEntry, Order, OrderItem, PayingStatus, RefundStatus,
};
use crate::order::application::domain::transitions::{OrderTransition, StockMove};
use crate::order::application::ports::outgoing::{
    NewOrderRecord, OrderRepository, OrderRepositoryError, PaymentStateChange,
};

#[derive(Clone)]
pub struct OrderRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl OrderRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Row-locks the order for the rest of the transaction.
    async fn lock<C: ConnectionTrait>(
        conn: &C,
        order_id: Uuid,
    ) -> Result<orders::Model, OrderRepositoryError> {
        Entity::find_by_id(order_id)
            .lock_exclusive()
            .one(conn)
            .await
            .map_err(map_db_err)?
            .ok_or(OrderRepositoryError::NotFound)
    }

    async fn move_stock<C: ConnectionTrait>(
        conn: &C,
        stock: &StockMove,
    ) -> Result<(), OrderRepositoryError> {
        match stock {
            StockMove::None => Ok(()),
            StockMove::Reserve(items) => {
                for item in items {
                    Self::reserve(conn, item).await?;
                }
                Ok(())
            }
            StockMove::Release(items) => {
                for item in items {
                    products::Entity::update_many()
                        .col_expr(
                            products::Column::Stock,
                            Expr::col(products::Column::Stock).add(item.quantity),
                        )
                        .filter(products::Column::Id.eq(item.product_id))
                        .exec(conn)
                        .await
                        .map_err(map_db_err)?;
                }
                Ok(())
            }
        }
    }

    async fn reserve<C: ConnectionTrait>(
        conn: &C,
        item: &OrderItem,
    ) -> Result<(), OrderRepositoryError> {
        let result = products::Entity::update_many()
            .col_expr(
                products::Column::Stock,
                Expr::col(products::Column::Stock).sub(item.quantity),
            )
            .filter(products::Column::Id.eq(item.product_id))
            .filter(products::Column::Stock.gte(item.quantity))
            .exec(conn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            warn!(product_id = %item.product_id, quantity = item.quantity, "Stock reservation failed");
            return Err(OrderRepositoryError::InsufficientStock(item.product_id));
        }
        Ok(())
    }

    async fn transition_in<C: ConnectionTrait>(
        conn: &C,
        transition: OrderTransition,
    ) -> Result<Order, OrderRepositoryError> {
        let model = Self::lock(conn, transition.order_id).await?;

        if model.status != transition.from.as_str() {
            return Err(OrderRepositoryError::StatusConflict);
        }

        Self::move_stock(conn, &transition.stock).await?;

        let history = with_entry(&model, transition.history)?;
        let mut active = model.into_active_model();
        active.status = Set(transition.to.as_str().to_string());
        if let Some(paying) = transition.paying_status {
            active.paying_status = Set(paying.as_str().to_string());
        }
        if let Some(refund) = transition.refund_status {
            active.refund_status = Set(refund.as_str().to_string());
        }
        active.history = Set(history);

        to_order(active.update(conn).await.map_err(map_db_err)?)
    }

    async fn payment_state_in<C: ConnectionTrait>(
        conn: &C,
        change: PaymentStateChange,
    ) -> Result<Order, OrderRepositoryError> {
        let model = Self::lock(conn, change.order_id).await?;

        // A concurrent notification may have settled the order while this one waited on the lock.
        if model.paying_status == PayingStatus::Paid.as_str()
            && matches!(change.paying_status, PayingStatus::Paid | PayingStatus::Failed)
        {
            return to_order(model);
        }

        let history = with_entry(&model, change.history)?;
        let mut active = model.into_active_model();
        active.paying_status = Set(change.paying_status.as_str().to_string());
        if let Some(refund) = change.refund_status {
            active.refund_status = Set(refund.as_str().to_string());
        }
        active.history = Set(history);

        to_order(active.update(conn).await.map_err(map_db_err)?)
    }

    async fn reference_in<C: ConnectionTrait>(
        conn: &C,
        order_id: Uuid,
        reference: &str,
    ) -> Result<Order, OrderRepositoryError> {
        let model = Self::lock(conn, order_id).await?;

        payment_attempts::Entity::insert(payment_attempts::ActiveModel {
            reference: Set(reference.to_string()),
            order_id: Set(order_id),
            created_at: Set(chrono::Utc::now().into()),
        })
        .exec_without_returning(conn)
        .await
        .map_err(map_db_err)?;

        let mut active = model.into_active_model();
        active.payment_reference = Set(Some(reference.to_string()));

        to_order(active.update(conn).await.map_err(map_db_err)?)
    }

    async fn refund_in<C: ConnectionTrait>(
        conn: &C,
        order_id: Uuid,
        entry: HistoryEntry,
    ) -> Result<Order, OrderRepositoryError> {
        let model = Self::lock(conn, order_id).await?;

        if model.refund_status != RefundStatus::Pending.as_str() {
            return Err(OrderRepositoryError::RefundNotPending);
        }

        let history = with_entry(&model, entry)?;
        let mut active = model.into_active_model();
        active.refund_status = Set(RefundStatus::Completed.as_str().to_string());
        active.paying_status = Set(PayingStatus::Refunded.as_str().to_string());
        active.history = Set(history);

        to_order(active.update(conn).await.map_err(map_db_err)?)
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryPostgres {
    async fn insert_order(&self, order: NewOrderRecord) -> Result<Order, OrderRepositoryError> {
        let active = ActiveModel {
            id: Set(order.id),
            user_id: Set(order.user_id),
            contact_email: Set(order.contact_email),
            items: Set(to_json(&order.items)?),
            total: Set(order.total),
            status: Set(order.status.as_str().to_string()),
            paying_status: Set(PayingStatus::Unpaid.as_str().to_string()),
            refund_status: Set(RefundStatus::None.as_str().to_string()),
            payment_method: Set(order.payment_method.as_str().to_string()),
            payment_reference: Set(None),
            shipping_name: Set(order.shipping_name),
            shipping_phone: Set(order.shipping_phone),
            shipping_address: Set(order.shipping_address),
            note: Set(order.note),
            history: Set(to_json(&order.history)?),
            ..Default::default()
        };

        to_order(active.insert(&*self.db).await.map_err(map_db_err)?)
    }

    async fn apply_transition(
        &self,
        transition: OrderTransition,
    ) -> Result<Order, OrderRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        match Self::transition_in(&txn, transition).await {
            Ok(order) => {
                txn.commit().await.map_err(map_db_err)?;
                Ok(order)
            }
            Err(e) => {
                rollback(txn).await;
                Err(e)
            }
        }
    }

    async fn set_payment_reference(
        &self,
        order_id: Uuid,
        reference: &str,
    ) -> Result<Order, OrderRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        match Self::reference_in(&txn, order_id, reference).await {
            Ok(order) => {
                txn.commit().await.map_err(map_db_err)?;
                Ok(order)
            }
            Err(e) => {
                rollback(txn).await;
                Err(e)
            }
        }
    }

    async fn update_payment_state(
        &self,
        change: PaymentStateChange,
    ) -> Result<Order, OrderRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        match Self::payment_state_in(&txn, change).await {
            Ok(order) => {
                txn.commit().await.map_err(map_db_err)?;
                Ok(order)
            }
            Err(e) => {
                rollback(txn).await;
                Err(e)
            }
        }
    }

    async fn complete_refund(
        &self,
        order_id: Uuid,
        history: HistoryEntry,
    ) -> Result<Order, OrderRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        match Self::refund_in(&txn, order_id, history).await {
            Ok(order) => {
                txn.commit().await.map_err(map_db_err)?;
                Ok(order)
            }
            Err(e) => {
                rollback(txn).await;
                Err(e)
            }
        }
    }
}

async fn rollback(txn: DatabaseTransaction) {
    if let Err(e) = txn.rollback().await {
        warn!(error = %e, "Order transaction rollback failed");
    }
}

fn with_entry(
    model: &orders::Model,
    entry: HistoryEntry,
) -> Result<serde_json::Value, OrderRepositoryError> {
    let mut history = model
        .history_entries()
        .map_err(OrderRepositoryError::SerializationError)?;
    history.push(entry);
    to_json(&history)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, OrderRepositoryError> {
    serde_json::to_value(value).map_err(|e| OrderRepositoryError::SerializationError(e.to_string()))
}

fn to_order(model: orders::Model) -> Result<Order, OrderRepositoryError> {
    Order::try_from(model).map_err(OrderRepositoryError::SerializationError)
}

fn map_db_err(e: DbErr) -> OrderRepositoryError {
    OrderRepositoryError::DatabaseError(e.to_string())
}
