use async_trait::async_trait;
use uuid::Uuid;

use crate::order::application::domain::entities::Order;
use crate::order::application::ports::outgoing::{OrderQueryError, OrderRepositoryError};

#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderPaymentError {
    #[error("Order not found")]
    NotFound,

    #[error("Order status changed concurrently")]
    StatusConflict,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<OrderRepositoryError> for OrderPaymentError {
    fn from(err: OrderRepositoryError) -> Self {
        match err {
            OrderRepositoryError::NotFound => OrderPaymentError::NotFound,
            OrderRepositoryError::StatusConflict => OrderPaymentError::StatusConflict,
            other => OrderPaymentError::RepositoryError(other.to_string()),
        }
    }
}

impl From<OrderQueryError> for OrderPaymentError {
    fn from(err: OrderQueryError) -> Self {
        OrderPaymentError::RepositoryError(err.to_string())
    }
}

/// Order-side operations the payment module drives.
#[async_trait]
pub trait OrderPaymentUseCase: Send + Sync {
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderPaymentError>;

    async fn find_by_reference(&self, reference: &str)
        -> Result<Option<Order>, OrderPaymentError>;

    async fn attach_reference(
        &self,
        order_id: Uuid,
        reference: &str,
    ) -> Result<Order, OrderPaymentError>;

    /// Records a confirmed payment. Drafts move to `Pending`; an order that was
    /// cancelled in the meantime goes straight to refund pending. Already paid
    /// orders are returned unchanged.
    async fn mark_paid(&self, order_id: Uuid, note: &str) -> Result<Order, OrderPaymentError>;

    async fn mark_failed(&self, order_id: Uuid, reason: &str) -> Result<Order, OrderPaymentError>;
}
