mod change_order_status_service;
mod complete_refund_service;
mod create_order_service;
mod get_order_service;
mod list_orders_service;
mod notifications;
mod order_payment_service;
mod order_stats_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use change_order_status_service::ChangeOrderStatusService;
pub use complete_refund_service::CompleteRefundService;
pub use create_order_service::CreateOrderService;
pub use get_order_service::GetOrderService;
pub use list_orders_service::ListOrdersService;
pub use notifications::OrderNotifications;
pub use order_payment_service::OrderPaymentService;
pub use order_stats_service::OrderStatsService;
