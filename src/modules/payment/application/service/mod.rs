mod create_payment_service;
mod gateways;
mod handle_notification_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use create_payment_service::CreatePaymentService;
pub use gateways::PaymentGateways;
pub use handle_notification_service::HandleNotificationService;
