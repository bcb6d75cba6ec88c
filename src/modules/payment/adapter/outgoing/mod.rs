mod momo_gateway;
mod payos_gateway;

pub use momo_gateway::{MomoConfig, MomoGateway};
pub use payos_gateway::{PayosConfig, PayosGateway};

use std::env;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

fn required(key: &'static str) -> Result<String, GatewayConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(GatewayConfigError::Missing(key))
}
