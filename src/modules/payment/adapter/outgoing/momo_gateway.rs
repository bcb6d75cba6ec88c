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
use crate::payment::application::domain::signature::{join_pairs, sign_hex, verify_hex};
use crate::payment::application::ports::outgoing::{PaymentGateway, PaymentGatewayError};
use crate::shared::app_urls::AppUrls;

const DEFAULT_ENDPOINT: &str = "https://test-payment.momo.vn/v2/gateway/api/create";
const REQUEST_TYPE: &str = "captureWallet";

#[derive(Clone)]
pub struct MomoConfig {
    pub partner_code: String,
    pub access_key: String,
    pub secret_key: String,
    pub endpoint: String,
    pub ipn_url: String,
}

impl std::fmt::Debug for MomoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MomoConfig")
            .field("partner_code", &self.partner_code)
            .field("access_key", &"[REDACTED]")
            .field("secret_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("ipn_url", &self.ipn_url)
            .finish()
    }
}

impl MomoConfig {
    pub fn from_env(urls: &AppUrls) -> Result<Self, GatewayConfigError> {
        Ok(Self {
            partner_code: required("MOMO_PARTNER_CODE")?,
            access_key: required("MOMO_ACCESS_KEY")?,
            secret_key: required("MOMO_SECRET_KEY")?,
            endpoint: env::var("MOMO_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            ipn_url: env::var("MOMO_IPN_URL").unwrap_or_else(|_| urls.momo_ipn_url()),
        })
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    partner_code: String,
    request_id: String,
    amount: i64,
    order_id: String,
    order_info: String,
    redirect_url: String,
    ipn_url: String,
    request_type: &'static str,
    extra_data: String,
    lang: &'static str,
    signature: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateResponse {
    result_code: i64,
    #[serde(default)]
    message: String,
    pay_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ipn {
    partner_code: String,
    order_id: String,
    request_id: String,
    amount: i64,
    #[serde(default)]
    order_info: String,
    #[serde(default)]
    order_type: String,
    trans_id: i64,
    result_code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    pay_type: String,
    response_time: i64,
    #[serde(default)]
    extra_data: String,
    signature: String,
}

#[derive(Clone)]
pub struct MomoGateway {
    client: Client,
    config: MomoConfig,
}

impl MomoGateway {
    pub fn new(config: MomoConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn create_request(&self, request: &PaymentRequest) -> Result<CreateRequest, PaymentGatewayError> {
        let extra_data = String::new();
        let raw = join_pairs(&[
            ("accessKey", self.config.access_key.clone()),
            ("amount", request.amount.to_string()),
            ("extraData", extra_data.clone()),
            ("ipnUrl", self.config.ipn_url.clone()),
            ("orderId", request.reference.clone()),
            ("orderInfo", request.description.clone()),
            ("partnerCode", self.config.partner_code.clone()),
            ("redirectUrl", request.return_url.clone()),
            ("requestId", request.reference.clone()),
            ("requestType", REQUEST_TYPE.to_string()),
        ]);
        let signature =
            sign_hex(&self.config.secret_key, &raw).map_err(|_| PaymentGatewayError::Signing)?;

        Ok(CreateRequest {
            partner_code: self.config.partner_code.clone(),
            request_id: request.reference.clone(),
            amount: request.amount,
            order_id: request.reference.clone(),
            order_info: request.description.clone(),
            redirect_url: request.return_url.clone(),
            ipn_url: self.config.ipn_url.clone(),
            request_type: REQUEST_TYPE,
            extra_data,
            lang: "vi",
            signature,
        })
    }

    fn ipn_raw_signature(&self, ipn: &Ipn) -> String {
        join_pairs(&[
            ("accessKey", self.config.access_key.clone()),
            ("amount", ipn.amount.to_string()),
            ("extraData", ipn.extra_data.clone()),
            ("message", ipn.message.clone()),
            ("orderId", ipn.order_id.clone()),
            ("orderInfo", ipn.order_info.clone()),
            ("orderType", ipn.order_type.clone()),
            ("partnerCode", ipn.partner_code.clone()),
            ("payType", ipn.pay_type.clone()),
            ("requestId", ipn.request_id.clone()),
            ("responseTime", ipn.response_time.to_string()),
            ("resultCode", ipn.result_code.to_string()),
            ("transId", ipn.trans_id.to_string()),
        ])
    }
}

#[async_trait]
impl PaymentGateway for MomoGateway {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Momo
    }

    fn new_reference(&self, order_id: Uuid, now: DateTime<Utc>) -> String {
        format!("{}-{}", order_id, now.timestamp_millis())
    }

    async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentLink, PaymentGatewayError> {
        let body = self.create_request(request)?;

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "MoMo create request failed");
                PaymentGatewayError::Transport(e.to_string())
            })?;

        let result: CreateResponse = response
            .json()
            .await
            .map_err(|e| PaymentGatewayError::MalformedPayload(e.to_string()))?;

        if result.result_code != 0 {
            warn!(result_code = result.result_code, message = %result.message, "MoMo rejected payment");
            return Err(PaymentGatewayError::Rejected(format!(
                "{} ({})",
                result.message, result.result_code
            )));
        }

        let checkout_url = result.pay_url.ok_or_else(|| {
            PaymentGatewayError::MalformedPayload("payUrl missing".to_string())
        })?;
        debug!(reference = %request.reference, "MoMo payment created");

        Ok(PaymentLink {
            provider: PaymentProvider::Momo,
            checkout_url,
            reference: request.reference.clone(),
        })
    }

    fn parse_notification(
        &self,
        payload: &Value,
    ) -> Result<PaymentNotification, PaymentGatewayError> {
        let ipn: Ipn = serde_json::from_value(payload.clone())
            .map_err(|e| PaymentGatewayError::MalformedPayload(e.to_string()))?;

        if !verify_hex(&self.config.secret_key, &self.ipn_raw_signature(&ipn), &ipn.signature) {
            warn!(order_id = %ipn.order_id, "MoMo IPN signature mismatch");
            return Err(PaymentGatewayError::InvalidSignature);
        }

        Ok(PaymentNotification {
            provider: PaymentProvider::Momo,
            reference: ipn.order_id,
            success: ipn.result_code == 0,
            transaction_id: Some(ipn.trans_id.to_string()),
            amount: ipn.amount,
            message: ipn.message,
        })
    }
}
