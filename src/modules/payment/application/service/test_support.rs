use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::order::application::domain::entities::{
    HistoryEntry, Order, OrderStatus, PayingStatus,
};
use crate::order::application::ports::incoming::use_cases::{
    OrderPaymentError, OrderPaymentUseCase,
};
use crate::payment::application::domain::entities::{
    PaymentLink, PaymentNotification, PaymentProvider, PaymentRequest,
};
use crate::payment::application::ports::outgoing::{PaymentGateway, PaymentGatewayError};

/// Gateway double. Notifications are plain JSON:
/// `{ "valid": bool, "reference", "success", "amount" }`.
pub struct FakeGateway {
    pub provider: PaymentProvider,
    pub fail_with: Option<PaymentGatewayError>,
    pub requests: Mutex<Vec<PaymentRequest>>,
    issued: AtomicUsize,
}

impl FakeGateway {
    pub fn new(provider: PaymentProvider) -> Self {
        Self {
            provider,
            fail_with: None,
            requests: Mutex::new(vec![]),
            issued: AtomicUsize::new(0),
        }
    }

    pub fn failing(provider: PaymentProvider, err: PaymentGatewayError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::new(provider)
        }
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    fn provider(&self) -> PaymentProvider {
        self.provider
    }

    fn new_reference(&self, order_id: Uuid, _now: DateTime<Utc>) -> String {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        format!("ref-{order_id}-{n}")
    }

    async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentLink, PaymentGatewayError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.requests.lock().unwrap().push(request.clone());
        Ok(PaymentLink {
            provider: self.provider,
            checkout_url: format!("https://pay.test/{}", request.reference),
            reference: request.reference.clone(),
        })
    }

    fn parse_notification(
        &self,
        payload: &Value,
    ) -> Result<PaymentNotification, PaymentGatewayError> {
        if !payload["valid"].as_bool().unwrap_or(false) {
            return Err(PaymentGatewayError::InvalidSignature);
        }
        Ok(PaymentNotification {
            provider: self.provider,
            reference: payload["reference"].as_str().unwrap_or_default().to_string(),
            success: payload["success"].as_bool().unwrap_or(false),
            transaction_id: Some("tx-1".to_string()),
            amount: payload["amount"].as_i64().unwrap_or_default(),
            message: "test".to_string(),
        })
    }
}

/// Records what the payment services asked of the order module.
#[derive(Clone, Default)]
pub struct FakeOrderPayments {
    pub orders: Arc<Mutex<Vec<Order>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub references: Arc<Mutex<HashMap<String, Uuid>>>,
}

impl FakeOrderPayments {
    pub fn with(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(Mutex::new(orders)),
            calls: Arc::default(),
            references: Arc::default(),
        }
    }

    pub fn get(&self, order_id: Uuid) -> Option<Order> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn update(
        &self,
        order_id: Uuid,
        f: impl FnOnce(&mut Order),
    ) -> Result<Order, OrderPaymentError> {
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(OrderPaymentError::NotFound)?;
        f(order);
        Ok(order.clone())
    }
}

#[async_trait]
impl OrderPaymentUseCase for FakeOrderPayments {
    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderPaymentError> {
        Ok(self.get(order_id))
    }

    async fn find_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Order>, OrderPaymentError> {
        if let Some(id) = self.references.lock().unwrap().get(reference).copied() {
            return Ok(self.get(id));
        }
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.payment_reference.as_deref() == Some(reference))
            .cloned())
    }

    async fn attach_reference(
        &self,
        order_id: Uuid,
        reference: &str,
    ) -> Result<Order, OrderPaymentError> {
        self.calls.lock().unwrap().push(format!("attach:{reference}"));
        let order = self.update(order_id, |o| o.payment_reference = Some(reference.to_string()))?;
        self.references
            .lock()
            .unwrap()
            .insert(reference.to_string(), order_id);
        Ok(order)
    }

    async fn mark_paid(&self, order_id: Uuid, note: &str) -> Result<Order, OrderPaymentError> {
        self.calls.lock().unwrap().push("paid".to_string());
        self.update(order_id, |o| {
            o.paying_status = PayingStatus::Paid;
            if o.status == OrderStatus::Draft {
                o.status = OrderStatus::Pending;
            }
            o.history.push(HistoryEntry::now(note));
        })
    }

    async fn mark_failed(&self, order_id: Uuid, reason: &str) -> Result<Order, OrderPaymentError> {
        self.calls.lock().unwrap().push(format!("failed:{reason}"));
        self.update(order_id, |o| o.paying_status = PayingStatus::Failed)
    }
}
