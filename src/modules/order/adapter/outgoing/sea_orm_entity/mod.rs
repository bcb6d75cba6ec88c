pub mod orders;
pub mod payment_attempts;
