mod create_payment;
mod notifications;

pub use create_payment::*;
pub use notifications::*;
