pub mod auth_use_cases;
pub mod domain;
pub mod helpers;
pub mod orchestrator;
pub mod ports;
pub mod use_cases;
