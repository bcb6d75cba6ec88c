use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::order::application::domain::entities::{
    HistoryEntry, Order, OrderStatus, PayingStatus, RefundStatus,
};
use crate::order::application::domain::transitions::{plan_transition, TransitionActor};
use crate::order::application::ports::incoming::use_cases::{
    OrderPaymentError, OrderPaymentUseCase,
};
use crate::order::application::ports::outgoing::{
    OrderQuery, OrderRepository, OrderRepositoryError, PaymentStateChange,
};
use crate::order::application::service::OrderNotifications;

pub struct OrderPaymentService<Q, R>
where
    Q: OrderQuery,
    R: OrderRepository,
{
    query: Q,
    repository: R,
    notifications: OrderNotifications,
}

impl<Q, R> OrderPaymentService<Q, R>
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

    async fn load(&self, order_id: Uuid) -> Result<Order, OrderPaymentError> {
        self.query
            .find_by_id(order_id)
            .await?
            .ok_or(OrderPaymentError::NotFound)
    }
}

#[async_trait]
impl<Q, R> OrderPaymentUseCase for OrderPaymentService<Q, R>
where
    Q: OrderQuery + Send + Sync,
    R: OrderRepository + Send + Sync,
{
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderPaymentError> {
        Ok(self.query.find_by_id(order_id).await?)
    }

    async fn find_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Order>, OrderPaymentError> {
        Ok(self.query.find_by_payment_reference(reference).await?)
    }

    async fn attach_reference(
        &self,
        order_id: Uuid,
        reference: &str,
    ) -> Result<Order, OrderPaymentError> {
        Ok(self
            .repository
            .set_payment_reference(order_id, reference)
            .await?)
    }

    async fn mark_paid(&self, order_id: Uuid, note: &str) -> Result<Order, OrderPaymentError> {
        let order = self.load(order_id).await?;

        if order.paying_status == PayingStatus::Paid {
            info!(%order_id, "Duplicate payment confirmation ignored");
            return Ok(order);
        }

        if order.status == OrderStatus::Draft {
            let mut transition =
                plan_transition(&order, &TransitionActor::PaymentGateway, OrderStatus::Pending)
                    .map_err(|e| OrderPaymentError::RepositoryError(e.to_string()))?;
            transition.paying_status = Some(PayingStatus::Paid);
            transition.history =
                HistoryEntry::now(format!("Payment received ({note}); awaiting confirmation"));

            let updated = match self.repository.apply_transition(transition).await {
                Ok(updated) => updated,
                Err(OrderRepositoryError::StatusConflict) => {
                    let current = self.load(order_id).await?;
                    if current.paying_status == PayingStatus::Paid {
                        info!(%order_id, "Payment already confirmed concurrently");
                        return Ok(current);
                    }
                    return Err(OrderPaymentError::StatusConflict);
                }
                Err(e) => return Err(e.into()),
            };
            info!(%order_id, "Payment received, order pending");
            self.notifications.status_changed(&updated, false);
            return Ok(updated);
        }

        // Money arrived for an order that is no longer waiting for it.
        let refund = order.status.is_cancelled();
        let updated = self
            .repository
            .update_payment_state(PaymentStateChange {
                order_id,
                paying_status: PayingStatus::Paid,
                refund_status: refund.then_some(RefundStatus::Pending),
                history: HistoryEntry::now(if refund {
                    format!("Payment received ({note}) after cancellation; refund pending")
                } else {
                    format!("Payment received ({note})")
                }),
            })
            .await?;

        if updated.history.len() == order.history.len() {
            info!(%order_id, "Payment already confirmed concurrently");
            return Ok(updated);
        }

        if refund {
            warn!(%order_id, status = %order.status, "Payment received for cancelled order");
            self.notifications.refund_started(&updated);
        } else {
            self.notifications.publish(&updated);
        }

        Ok(updated)
    }

    async fn mark_failed(&self, order_id: Uuid, reason: &str) -> Result<Order, OrderPaymentError> {
        let order = self.load(order_id).await?;

        if order.paying_status == PayingStatus::Paid {
            warn!(%order_id, "Failure notice for an already paid order ignored");
            return Ok(order);
        }

        let updated = self
            .repository
            .update_payment_state(PaymentStateChange {
                order_id,
                paying_status: PayingStatus::Failed,
                refund_status: None,
                history: HistoryEntry::now(format!("Payment failed: {reason}")),
            })
            .await?;

        if updated.history.len() != order.history.len() {
            self.notifications.publish(&updated);
        }
        Ok(updated)
    }
}
