use async_trait::async_trait;
use uuid::Uuid;

use crate::order::application::domain::entities::{
    HistoryEntry, Order, OrderItem, OrderStatus, PayingStatus, PaymentMethod, RefundStatus,
};
use crate::order::application::domain::transitions::OrderTransition;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderRepositoryError {
    #[error("Order not found")]
    NotFound,

    #[error("Order status changed concurrently")]
    StatusConflict,

    #[error("Insufficient stock for product {0}")]
    InsufficientStock(Uuid),

    #[error("No refund is pending for this order")]
    RefundNotPending,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contact_email: String,
    pub items: Vec<OrderItem>,
    pub total: i64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub shipping_name: String,
    pub shipping_phone: String,
    pub shipping_address: String,
    pub note: Option<String>,
    pub history: Vec<HistoryEntry>,
}

/// Payment bookkeeping that does not move the fulfillment status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentStateChange {
    pub order_id: Uuid,
    pub paying_status: PayingStatus,
    pub refund_status: Option<RefundStatus>,
    pub history: HistoryEntry,
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert_order(&self, order: NewOrderRecord) -> Result<Order, OrderRepositoryError>;

    /// Applies status, stock moves and history in one transaction. Fails with
    /// `StatusConflict` when the stored status is no longer `transition.from`.
    async fn apply_transition(
        &self,
        transition: OrderTransition,
    ) -> Result<Order, OrderRepositoryError>;

    async fn set_payment_reference(
        &self,
        order_id: Uuid,
        reference: &str,
    ) -> Result<Order, OrderRepositoryError>;

    async fn update_payment_state(
        &self,
        change: PaymentStateChange,
    ) -> Result<Order, OrderRepositoryError>;

    /// Only succeeds while the refund is pending.
    async fn complete_refund(
        &self,
        order_id: Uuid,
        history: HistoryEntry,
    ) -> Result<Order, OrderRepositoryError>;
}
