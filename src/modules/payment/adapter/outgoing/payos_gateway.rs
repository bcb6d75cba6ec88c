use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::{required, GatewayConfigError};
use crate::payment::application::domain::entities::{
    PaymentLink, PaymentNotification, PaymentProvider, PaymentRequest,
};
use crate::payment::application::domain::signature::{
    join_pairs, sign_hex, sorted_query, verify_hex,
};
use crate::payment::application::ports::outgoing::{PaymentGateway, PaymentGatewayError};

const DEFAULT_BASE_URL: &str = "https://api-merchant.payos.vn";
const SUCCESS_CODE: &str = "00";

#[derive(Clone)]
pub struct PayosConfig {
    pub client_id: String,
    pub api_key: String,
    pub checksum_key: String,
    pub base_url: String,
}

impl std::fmt::Debug for PayosConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayosConfig")
            .field("client_id", &self.client_id)
            .field("api_key", &"[REDACTED]")
            .field("checksum_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PayosConfig {
    pub fn from_env() -> Result<Self, GatewayConfigError> {
        Ok(Self {
            client_id: required("PAYOS_CLIENT_ID")?,
            api_key: required("PAYOS_API_KEY")?,
            checksum_key: required("PAYOS_CHECKSUM_KEY")?,
            base_url: env::var("PAYOS_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    order_code: i64,
    amount: i64,
    description: String,
    cancel_url: String,
    return_url: String,
    signature: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutData {
    checkout_url: String,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    code: String,
    #[serde(default)]
    desc: String,
    data: Option<CheckoutData>,
}

#[derive(Debug, Deserialize)]
struct Webhook {
    #[serde(default)]
    code: String,
    #[serde(default)]
    desc: String,
    data: serde_json::Map<String, Value>,
    signature: String,
}

#[derive(Clone)]
pub struct PayosGateway {
    client: Client,
    config: PayosConfig,
}

impl PayosGateway {
    pub fn new(config: PayosConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn create_request(&self, request: &PaymentRequest) -> Result<CreateRequest, PaymentGatewayError> {
        let order_code: i64 = request.reference.parse().map_err(|_| {
            PaymentGatewayError::MalformedPayload(format!(
                "PayOS order code must be numeric, got {}",
                request.reference
            ))
        })?;

        let raw = join_pairs(&[
            ("amount", request.amount.to_string()),
            ("cancelUrl", request.cancel_url.clone()),
            ("description", request.description.clone()),
            ("orderCode", order_code.to_string()),
            ("returnUrl", request.return_url.clone()),
        ]);
        let signature =
            sign_hex(&self.config.checksum_key, &raw).map_err(|_| PaymentGatewayError::Signing)?;

        Ok(CreateRequest {
            order_code,
            amount: request.amount,
            description: request.description.clone(),
            cancel_url: request.cancel_url.clone(),
            return_url: request.return_url.clone(),
            signature,
        })
    }
}

fn text(data: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl PaymentGateway for PayosGateway {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Payos
    }

    fn new_reference(&self, _order_id: Uuid, now: DateTime<Utc>) -> String {
        now.timestamp_millis().to_string()
    }

    async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentLink, PaymentGatewayError> {
        let body = self.create_request(request)?;

        let response = self
            .client
            .post(format!("{}/v2/payment-requests", self.config.base_url))
            .header("x-client-id", &self.config.client_id)
            .header("x-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "PayOS create request failed");
                PaymentGatewayError::Transport(e.to_string())
            })?;

        let result: CreateResponse = response
            .json()
            .await
            .map_err(|e| PaymentGatewayError::MalformedPayload(e.to_string()))?;

        if result.code != SUCCESS_CODE {
            warn!(code = %result.code, desc = %result.desc, "PayOS rejected payment");
            return Err(PaymentGatewayError::Rejected(format!(
                "{} ({})",
                result.desc, result.code
            )));
        }

        let data = result.data.ok_or_else(|| {
            PaymentGatewayError::MalformedPayload("checkout data missing".to_string())
        })?;
        debug!(reference = %request.reference, "PayOS payment created");

        Ok(PaymentLink {
            provider: PaymentProvider::Payos,
            checkout_url: data.checkout_url,
            reference: request.reference.clone(),
        })
    }

    fn parse_notification(
        &self,
        payload: &Value,
    ) -> Result<PaymentNotification, PaymentGatewayError> {
        let webhook: Webhook = serde_json::from_value(payload.clone())
            .map_err(|e| PaymentGatewayError::MalformedPayload(e.to_string()))?;

        if !verify_hex(
            &self.config.checksum_key,
            &sorted_query(&webhook.data),
            &webhook.signature,
        ) {
            warn!("PayOS webhook signature mismatch");
            return Err(PaymentGatewayError::InvalidSignature);
        }

        let reference = text(&webhook.data, "orderCode").ok_or_else(|| {
            PaymentGatewayError::MalformedPayload("orderCode missing".to_string())
        })?;
        let amount = webhook
            .data
            .get("amount")
            .and_then(Value::as_i64)
            .ok_or_else(|| PaymentGatewayError::MalformedPayload("amount missing".to_string()))?;
        let code = text(&webhook.data, "code").unwrap_or(webhook.code);
        let message = text(&webhook.data, "desc").unwrap_or(webhook.desc);

        Ok(PaymentNotification {
            provider: PaymentProvider::Payos,
            reference,
            success: code == SUCCESS_CODE,
            transaction_id: text(&webhook.data, "reference"),
            amount,
            message,
        })
    }
}
