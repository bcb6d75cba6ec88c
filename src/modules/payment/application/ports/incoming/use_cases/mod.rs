mod create_payment;
mod handle_notification;

pub use create_payment::{CreatePaymentError, CreatePaymentUseCase};
pub use handle_notification::{
    HandleNotificationError, HandleNotificationUseCase, NotificationOutcome,
};
