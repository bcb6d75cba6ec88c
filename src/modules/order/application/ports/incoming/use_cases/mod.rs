mod change_order_status;
mod complete_refund;
mod create_order;
mod get_order;
mod list_orders;
mod order_payment;
mod order_stats;

pub use change_order_status::{ChangeOrderStatusError, ChangeOrderStatusUseCase};
pub use complete_refund::{CompleteRefundError, CompleteRefundUseCase};
pub use create_order::{CreateOrderError, CreateOrderUseCase};
pub use get_order::{GetOrderError, GetOrderUseCase, OrderViewer};
pub use list_orders::{ListOrdersError, ListOrdersUseCase};
pub use order_payment::{OrderPaymentError, OrderPaymentUseCase};
pub use order_stats::{OrderStatsError, OrderStatsUseCase};
