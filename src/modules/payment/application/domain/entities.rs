use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::order::application::domain::entities::PaymentMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentProvider {
    Momo,
    Payos,
}

impl PaymentProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentProvider::Momo => "momo",
            PaymentProvider::Payos => "payos",
        }
    }

    /// Orders are paid through the gateway chosen at checkout.
    pub fn serves(&self, method: PaymentMethod) -> bool {
        matches!(
            (self, method),
            (PaymentProvider::Momo, PaymentMethod::Momo)
                | (PaymentProvider::Payos, PaymentMethod::Payos)
        )
    }
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What we ask a gateway to collect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub order_id: Uuid,
    pub reference: String,
    /// VND, no minor units.
    pub amount: i64,
    pub description: String,
    pub return_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaymentLink {
    pub provider: PaymentProvider,
    pub checkout_url: String,
    pub reference: String,
}

/// A gateway callback whose signature has already been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentNotification {
    pub provider: PaymentProvider,
    pub reference: String,
    pub success: bool,
    pub transaction_id: Option<String>,
    pub amount: i64,
    pub message: String,
}
