use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::order::application::domain::entities::{Order, OrderStatus};
use crate::order::application::domain::transitions::{plan_transition, TransitionActor};
use crate::order::application::ports::incoming::use_cases::{
    ChangeOrderStatusError, ChangeOrderStatusUseCase,
};
use crate::order::application::ports::outgoing::{OrderQuery, OrderRepository};
use crate::order::application::service::OrderNotifications;

pub struct ChangeOrderStatusService<Q, R>
where
    Q: OrderQuery,
    R: OrderRepository,
{
    query: Q,
    repository: R,
    notifications: OrderNotifications,
}

impl<Q, R> ChangeOrderStatusService<Q, R>
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
impl<Q, R> ChangeOrderStatusUseCase for ChangeOrderStatusService<Q, R>
where
    Q: OrderQuery + Send + Sync,
    R: OrderRepository + Send + Sync,
{
    async fn execute(
        &self,
        order_id: Uuid,
        actor: TransitionActor,
        next: OrderStatus,
    ) -> Result<Order, ChangeOrderStatusError> {
        let order = self
            .query
            .find_by_id(order_id)
            .await?
            .ok_or(ChangeOrderStatusError::NotFound)?;

        // Customers never learn about orders that are not theirs.
        if let TransitionActor::Customer(user_id) = actor {
            if !order.is_owned_by(user_id.value()) {
                return Err(ChangeOrderStatusError::NotFound);
            }
        }

        let transition = plan_transition(&order, &actor, next).inspect_err(|e| {
            warn!(%order_id, error = %e, "Status change rejected");
        })?;
        let refund_started = transition.starts_refund();

        let updated = self.repository.apply_transition(transition).await?;

        info!(
            %order_id,
            from = %order.status,
            to = %updated.status,
            "Order status changed"
        );
        self.notifications.status_changed(&updated, refund_started);

        Ok(updated)
    }
}
