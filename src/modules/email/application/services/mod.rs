pub mod email_service;
mod templates;

pub use email_service::EmailService;
