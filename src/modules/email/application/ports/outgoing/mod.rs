pub mod email_sender;
pub mod order_email_notifier;
pub mod user_email_notifier;

pub use email_sender::{EmailSendError, EmailSender};
pub use order_email_notifier::{OrderEmailNotifier, OrderNotificationError};
pub use user_email_notifier::{EmailRecipient, UserEmailNotificationError, UserEmailNotifier};
