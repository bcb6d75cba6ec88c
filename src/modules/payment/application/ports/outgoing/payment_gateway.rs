use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::payment::application::domain::entities::{
    PaymentLink, PaymentNotification, PaymentProvider, PaymentRequest,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentGatewayError {
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Malformed gateway payload: {0}")]
    MalformedPayload(String),

    #[error("Gateway rejected the request: {0}")]
    Rejected(String),

    #[error("Gateway unreachable: {0}")]
    Transport(String),

    #[error("Signing key is unusable")]
    Signing,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn provider(&self) -> PaymentProvider;

    /// Fresh provider-side reference for one payment attempt.
    fn new_reference(&self, order_id: Uuid, now: DateTime<Utc>) -> String;

    async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentLink, PaymentGatewayError>;

    /// Verifies the callback signature and extracts the result.
    fn parse_notification(&self, payload: &Value)
        -> Result<PaymentNotification, PaymentGatewayError>;
}
