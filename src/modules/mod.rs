pub mod auth;
pub mod catalog;
pub mod email;
pub mod order;
pub mod payment;
pub mod review;
