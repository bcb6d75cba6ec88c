use std::sync::Arc;

use crate::email::application::ports::outgoing::OrderEmailNotifier;
use crate::order::application::domain::entities::Order;
use crate::order::application::ports::outgoing::{OrderEvent, OrderEventPublisher};
use crate::shared::background::{spawn_with_retry, DEFAULT_MAX_ATTEMPTS};

#[derive(Clone, Copy)]
enum OrderMail {
    StatusChanged,
    RefundPending,
    RefundCompleted,
}

/// Pushes live events and queues customer emails after an order was persisted.
#[derive(Clone)]
pub struct OrderNotifications {
    events: Arc<dyn OrderEventPublisher + Send + Sync>,
    email: Arc<dyn OrderEmailNotifier + Send + Sync>,
}

impl OrderNotifications {
    pub fn new(
        events: Arc<dyn OrderEventPublisher + Send + Sync>,
        email: Arc<dyn OrderEmailNotifier + Send + Sync>,
    ) -> Self {
        Self { events, email }
    }

    pub fn publish(&self, order: &Order) {
        self.events.publish(OrderEvent::from(order));
    }

    pub fn status_changed(&self, order: &Order, refund_started: bool) {
        self.publish(order);
        self.send(order, OrderMail::StatusChanged);
        if refund_started {
            self.send(order, OrderMail::RefundPending);
        }
    }

    pub fn refund_started(&self, order: &Order) {
        self.publish(order);
        self.send(order, OrderMail::RefundPending);
    }

    pub fn refund_completed(&self, order: &Order) {
        self.publish(order);
        self.send(order, OrderMail::RefundCompleted);
    }

    fn send(&self, order: &Order, mail: OrderMail) {
        let email = self.email.clone();
        let order = order.clone();
        let label = match mail {
            OrderMail::StatusChanged => "order status email",
            OrderMail::RefundPending => "refund pending email",
            OrderMail::RefundCompleted => "refund completed email",
        };

        spawn_with_retry(label, DEFAULT_MAX_ATTEMPTS, move || {
            let email = email.clone();
            let order = order.clone();
            async move {
                match mail {
                    OrderMail::StatusChanged => email.send_status_changed(&order).await,
                    OrderMail::RefundPending => email.send_refund_pending(&order).await,
                    OrderMail::RefundCompleted => email.send_refund_completed(&order).await,
                }
            }
        });
    }
}
