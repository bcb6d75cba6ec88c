mod admin_orders;
mod customer_orders;
mod errors;
mod order_events;

pub use admin_orders::*;
pub use customer_orders::*;
pub use order_events::*;
