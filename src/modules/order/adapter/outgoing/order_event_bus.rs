use tokio::sync::broadcast;
use tracing::debug;

use crate::order::application::ports::outgoing::{OrderEvent, OrderEventPublisher};

const DEFAULT_CAPACITY: usize = 256;

/// In-process pub/sub for order changes. Slow subscribers lag and skip events
/// rather than blocking publishers.
#[derive(Clone)]
pub struct OrderEventBus {
    sender: broadcast::Sender<OrderEvent>,
}

impl OrderEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.sender.subscribe()
    }
}

impl Default for OrderEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl OrderEventPublisher for OrderEventBus {
    fn publish(&self, event: OrderEvent) {
        // Err only means nobody is listening right now.
        match self.sender.send(event) {
            Ok(receivers) => debug!(receivers, "Order event published"),
            Err(_) => debug!("Order event dropped, no subscribers"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::application::domain::entities::{sample_order, OrderStatus, PaymentMethod};
    use uuid::Uuid;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = OrderEventBus::default();
        let mut rx = bus.subscribe();
        let order = sample_order(Uuid::new_v4(), OrderStatus::Pending, PaymentMethod::Cod);

        bus.publish(OrderEvent::from(&order));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.order_id, order.id);
        assert_eq!(event.status, OrderStatus::Pending);
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = OrderEventBus::new(4);
        let order = sample_order(Uuid::new_v4(), OrderStatus::Draft, PaymentMethod::Momo);
        bus.publish(OrderEvent::from(&order));
    }
}
