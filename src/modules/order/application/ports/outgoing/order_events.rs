use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::order::application::domain::entities::{
    Order, OrderStatus, PayingStatus, RefundStatus,
};

/// Snapshot pushed to live subscribers whenever an order changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct OrderEvent {
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub paying_status: PayingStatus,
    pub refund_status: RefundStatus,
    pub at: DateTime<Utc>,
}

impl From<&Order> for OrderEvent {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            user_id: order.user_id,
            status: order.status,
            paying_status: order.paying_status,
            refund_status: order.refund_status,
            at: order.updated_at,
        }
    }
}

/// Fire-and-forget; publishing never fails the request that caused it.
pub trait OrderEventPublisher: Send + Sync {
    fn publish(&self, event: OrderEvent);
}
