use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use crate::email::application::ports::outgoing::{OrderEmailNotifier, OrderNotificationError};
use crate::order::application::domain::entities::{
    HistoryEntry, Order, OrderListFilter, PayingStatus, RefundStatus,
};
use crate::order::application::domain::stats::{OrderStats, StatsRange, StatusCount};
use crate::order::application::domain::transitions::{OrderTransition, StockMove};
use crate::order::application::ports::outgoing::{
    NewOrderRecord, OrderEvent, OrderEventPublisher, OrderQuery, OrderQueryError,
    OrderRepository, OrderRepositoryError, PaymentStateChange,
};
use crate::order::application::service::OrderNotifications;
use crate::shared::pagination::{PageRequest, PageResult};

/// Shared, clonable order store with a per-product stock table.
#[derive(Clone, Default)]
pub struct InMemoryOrders {
    pub orders: Arc<Mutex<Vec<Order>>>,
    pub stock: Arc<Mutex<HashMap<Uuid, i32>>>,
    /// Every payment reference issued, mapped to its order.
    pub references: Arc<Mutex<HashMap<String, Uuid>>>,
    pub fail: bool,
}

impl InMemoryOrders {
    pub fn with(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(Mutex::new(orders)),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn set_stock(&self, product_id: Uuid, stock: i32) {
        self.stock.lock().unwrap().insert(product_id, stock);
    }

    pub fn stock_of(&self, product_id: Uuid) -> i32 {
        self.stock
            .lock()
            .unwrap()
            .get(&product_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn get(&self, id: Uuid) -> Option<Order> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == id)
            .cloned()
    }

    fn check(&self) -> Result<(), OrderRepositoryError> {
        if self.fail {
            return Err(OrderRepositoryError::DatabaseError("db down".to_string()));
        }
        Ok(())
    }

    fn update<F>(&self, id: Uuid, f: F) -> Result<Order, OrderRepositoryError>
    where
        F: FnOnce(&mut Order) -> Result<(), OrderRepositoryError>,
    {
        self.check()?;
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(OrderRepositoryError::NotFound)?;
        f(order)?;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }
}

#[async_trait]
impl OrderQuery for InMemoryOrders {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, OrderQueryError> {
        if self.fail {
            return Err(OrderQueryError::DatabaseError("db down".to_string()));
        }
        Ok(self.get(id))
    }

    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Order>, OrderQueryError> {
        if self.fail {
            return Err(OrderQueryError::DatabaseError("db down".to_string()));
        }
        if let Some(id) = self.references.lock().unwrap().get(reference).copied() {
            return Ok(self.get(id));
        }
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.payment_reference.as_deref() == Some(reference))
            .cloned())
    }

    async fn list(
        &self,
        filter: OrderListFilter,
        page: PageRequest,
    ) -> Result<PageResult<Order>, OrderQueryError> {
        if self.fail {
            return Err(OrderQueryError::DatabaseError("db down".to_string()));
        }
        let mut matching: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| filter.status.map_or(true, |s| o.status == s))
            .filter(|o| filter.user_id.map_or(true, |u| o.user_id == u))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResult::new(items, page, total))
    }

    async fn stats(&self, _range: StatsRange) -> Result<OrderStats, OrderQueryError> {
        if self.fail {
            return Err(OrderQueryError::DatabaseError("db down".to_string()));
        }
        let orders = self.orders.lock().unwrap();
        let status_counts = crate::order::application::domain::entities::OrderStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: orders.iter().filter(|o| o.status == status).count() as i64,
            })
            .filter(|c| c.count > 0)
            .collect();
        Ok(OrderStats {
            status_counts,
            ..Default::default()
        })
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrders {
    async fn insert_order(&self, record: NewOrderRecord) -> Result<Order, OrderRepositoryError> {
        self.check()?;
        let now = Utc::now();
        let order = Order {
            id: record.id,
            user_id: record.user_id,
            contact_email: record.contact_email,
            items: record.items,
            total: record.total,
            status: record.status,
            paying_status: PayingStatus::Unpaid,
            refund_status: RefundStatus::None,
            payment_method: record.payment_method,
            payment_reference: None,
            shipping_name: record.shipping_name,
            shipping_phone: record.shipping_phone,
            shipping_address: record.shipping_address,
            note: record.note,
            history: record.history,
            created_at: now,
            updated_at: now,
        };
        self.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn apply_transition(
        &self,
        transition: OrderTransition,
    ) -> Result<Order, OrderRepositoryError> {
        let stock = self.stock.clone();
        self.update(transition.order_id, move |order| {
            if order.status != transition.from {
                return Err(OrderRepositoryError::StatusConflict);
            }

            let mut stock = stock.lock().unwrap();
            match &transition.stock {
                StockMove::None => {}
                StockMove::Reserve(items) => {
                    for item in items {
                        if stock.get(&item.product_id).copied().unwrap_or(0) < item.quantity {
                            return Err(OrderRepositoryError::InsufficientStock(item.product_id));
                        }
                    }
                    for item in items {
                        *stock.entry(item.product_id).or_insert(0) -= item.quantity;
                    }
                }
                StockMove::Release(items) => {
                    for item in items {
                        *stock.entry(item.product_id).or_insert(0) += item.quantity;
                    }
                }
            }

            order.status = transition.to;
            if let Some(paying) = transition.paying_status {
                order.paying_status = paying;
            }
            if let Some(refund) = transition.refund_status {
                order.refund_status = refund;
            }
            order.history.push(transition.history);
            Ok(())
        })
    }

    async fn set_payment_reference(
        &self,
        order_id: Uuid,
        reference: &str,
    ) -> Result<Order, OrderRepositoryError> {
        let issued = reference.to_string();
        let order = self.update(order_id, move |order| {
            order.payment_reference = Some(issued);
            Ok(())
        })?;
        self.references
            .lock()
            .unwrap()
            .insert(reference.to_string(), order_id);
        Ok(order)
    }

    async fn update_payment_state(
        &self,
        change: PaymentStateChange,
    ) -> Result<Order, OrderRepositoryError> {
        self.update(change.order_id, move |order| {
            if order.paying_status == PayingStatus::Paid
                && matches!(change.paying_status, PayingStatus::Paid | PayingStatus::Failed)
            {
                return Ok(());
            }
            order.paying_status = change.paying_status;
            if let Some(refund) = change.refund_status {
                order.refund_status = refund;
            }
            order.history.push(change.history);
            Ok(())
        })
    }

    async fn complete_refund(
        &self,
        order_id: Uuid,
        history: HistoryEntry,
    ) -> Result<Order, OrderRepositoryError> {
        self.update(order_id, move |order| {
            if order.refund_status != RefundStatus::Pending {
                return Err(OrderRepositoryError::RefundNotPending);
            }
            order.refund_status = RefundStatus::Completed;
            order.paying_status = PayingStatus::Refunded;
            order.history.push(history);
            Ok(())
        })
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    pub events: Mutex<Vec<OrderEvent>>,
}

impl OrderEventPublisher for RecordingEvents {
    fn publish(&self, event: OrderEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[derive(Default)]
pub struct RecordingOrderMail {
    pub sent: Mutex<Vec<(&'static str, Uuid)>>,
}

impl RecordingOrderMail {
    pub fn kinds(&self) -> Vec<&'static str> {
        self.sent.lock().unwrap().iter().map(|(k, _)| *k).collect()
    }
}

#[async_trait]
impl OrderEmailNotifier for RecordingOrderMail {
    async fn send_status_changed(&self, order: &Order) -> Result<(), OrderNotificationError> {
        self.sent.lock().unwrap().push(("status", order.id));
        Ok(())
    }

    async fn send_refund_pending(&self, order: &Order) -> Result<(), OrderNotificationError> {
        self.sent.lock().unwrap().push(("refund_pending", order.id));
        Ok(())
    }

    async fn send_refund_completed(&self, order: &Order) -> Result<(), OrderNotificationError> {
        self.sent.lock().unwrap().push(("refund_completed", order.id));
        Ok(())
    }
}

/// Notification wiring whose effects can be inspected after the call.
pub struct Observed {
    pub events: Arc<RecordingEvents>,
    pub mail: Arc<RecordingOrderMail>,
    pub notifications: OrderNotifications,
}

pub fn observed() -> Observed {
    let events = Arc::new(RecordingEvents::default());
    let mail = Arc::new(RecordingOrderMail::default());
    let notifications = OrderNotifications::new(events.clone(), mail.clone());
    Observed {
        events,
        mail,
        notifications,
    }
}

/// Lets background email tasks run to completion.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}
