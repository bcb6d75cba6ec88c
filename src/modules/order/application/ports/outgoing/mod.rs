pub mod order_events;
pub mod order_query;
pub mod order_repository;

pub use order_events::{OrderEvent, OrderEventPublisher};
pub use order_query::{OrderQuery, OrderQueryError};
pub use order_repository::{
    NewOrderRecord, OrderRepository, OrderRepositoryError, PaymentStateChange,
};
