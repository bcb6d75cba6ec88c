use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::order::application::domain::entities::{HistoryEntry, Order, RefundStatus};
use crate::order::application::ports::incoming::use_cases::{
    CompleteRefundError, CompleteRefundUseCase,
};
use crate::order::application::ports::outgoing::{OrderQuery, OrderRepository};
use crate::order::application::service::OrderNotifications;

pub struct CompleteRefundService<Q, R>
where
    Q: OrderQuery,
    R: OrderRepository,
{
    query: Q,
    repository: R,
    notifications: OrderNotifications,
}

impl<Q, R> CompleteRefundService<Q, R>
where
    Q: OrderQuery,
    R: OrderRepository,
{
    pub fn new(query: Q, repository: R, notifications: OrderNotifications) -> Self {
        Self {
            query,
            repository,
            notifications,
        }
    }
}

#[async_trait]
impl<Q, R> CompleteRefundUseCase for CompleteRefundService<Q, R>
where
    Q: OrderQuery + Send + Sync,
    R: OrderRepository + Send + Sync,
{
    async fn execute(&self, order_id: Uuid, admin: UserId) -> Result<Order, CompleteRefundError> {
        let order = self
            .query
            .find_by_id(order_id)
            .await?
            .ok_or(CompleteRefundError::NotFound)?;

        if order.refund_status != RefundStatus::Pending {
            return Err(CompleteRefundError::RefundNotPending);
        }

        let updated = self
            .repository
            .complete_refund(order_id, HistoryEntry::now("Refund completed by admin"))
            .await?;

        info!(%order_id, admin_id = %admin, amount = updated.total, "Refund completed");
        self.notifications.refund_completed(&updated);

        Ok(updated)
    }
}
