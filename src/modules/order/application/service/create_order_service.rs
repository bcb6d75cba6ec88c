use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::UserQuery;
use crate::catalog::application::ports::outgoing::ProductQuery;
use crate::order::application::domain::checkout::{price_lines, CheckoutError, NewOrderRequest};
use crate::order::application::domain::entities::{HistoryEntry, Order};
use crate::order::application::ports::incoming::use_cases::{
    CreateOrderError, CreateOrderUseCase,
};
use crate::order::application::ports::outgoing::{NewOrderRecord, OrderRepository};
use crate::order::application::service::OrderNotifications;

impl From<CheckoutError> for CreateOrderError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Invalid(msg) => CreateOrderError::InvalidInput(msg),
            CheckoutError::ProductNotFound(id) => CreateOrderError::ProductNotFound(id),
            CheckoutError::InsufficientStock(id) => CreateOrderError::InsufficientStock(id),
        }
    }
}

pub struct CreateOrderService<R>
where
    R: OrderRepository,
{
    repository: R,
    products: Arc<dyn ProductQuery + Send + Sync>,
    users: Arc<dyn UserQuery + Send + Sync>,
    notifications: OrderNotifications,
}

impl<R> CreateOrderService<R>
where
    R: OrderRepository,
{
    pub fn new(
        repository: R,
        products: Arc<dyn ProductQuery + Send + Sync>,
        users: Arc<dyn UserQuery + Send + Sync>,
        notifications: OrderNotifications,
    ) -> Self {
        Self {
            repository,
            products,
            users,
            notifications,
        }
    }
}

#[async_trait]
impl<R> CreateOrderUseCase for CreateOrderService<R>
where
    R: OrderRepository + Send + Sync,
{
    async fn execute(
        &self,
        user_id: UserId,
        request: NewOrderRequest,
    ) -> Result<Order, CreateOrderError> {
        let request = request.validate()?;

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| CreateOrderError::RepositoryError(e.to_string()))?
            .filter(|u| !u.is_deleted)
            .ok_or(CreateOrderError::UserNotFound)?;

        let products = self
            .products
            .find_by_ids(&request.product_ids())
            .await
            .map_err(|e| CreateOrderError::RepositoryError(e.to_string()))?;

        let (items, total) = price_lines(&request.items, &products).inspect_err(|e| {
            warn!(%user_id, error = %e, "Checkout rejected");
        })?;

        let status = request.payment_method.initial_status();
        let record = NewOrderRecord {
            id: Uuid::new_v4(),
            user_id: user_id.value(),
            contact_email: user.email,
            items,
            total,
            status,
            payment_method: request.payment_method,
            shipping_name: request.shipping_name,
            shipping_phone: request.shipping_phone,
            shipping_address: request.shipping_address,
            note: request.note,
            history: vec![HistoryEntry::now(format!(
                "Order placed ({}), status {}",
                request.payment_method.as_str(),
                status.as_str()
            ))],
        };

        let order = self
            .repository
            .insert_order(record)
            .await
            .map_err(|e| CreateOrderError::RepositoryError(e.to_string()))?;

        info!(order_id = %order.id, %user_id, total = order.total, "Order created");
        self.notifications.publish(&order);

        Ok(order)
    }
}
