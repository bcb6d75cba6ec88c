use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::order::application::domain::entities::PayingStatus;
use crate::order::application::ports::incoming::use_cases::OrderPaymentUseCase;
use crate::payment::application::domain::entities::PaymentProvider;
use crate::payment::application::ports::incoming::use_cases::{
    HandleNotificationError, HandleNotificationUseCase, NotificationOutcome,
};
use crate::payment::application::service::PaymentGateways;

pub struct HandleNotificationService {
    orders: Arc<dyn OrderPaymentUseCase + Send + Sync>,
    gateways: PaymentGateways,
}

impl HandleNotificationService {
    pub fn new(orders: Arc<dyn OrderPaymentUseCase + Send + Sync>, gateways: PaymentGateways) -> Self {
        Self { orders, gateways }
    }
}

#[async_trait]
impl HandleNotificationUseCase for HandleNotificationService {
    async fn execute(
        &self,
        provider: PaymentProvider,
        payload: Value,
    ) -> Result<NotificationOutcome, HandleNotificationError> {
        let gateway = self
            .gateways
            .get(provider)
            .ok_or(HandleNotificationError::ProviderUnavailable(provider))?;

        let notification = gateway.parse_notification(&payload).map_err(|e| {
            warn!(%provider, error = %e, "Rejected payment notification");
            HandleNotificationError::from(e)
        })?;

        let order = self
            .orders
            .find_by_reference(&notification.reference)
            .await?
            .ok_or(HandleNotificationError::UnknownReference)?;

        if order.paying_status == PayingStatus::Paid {
            info!(order_id = %order.id, %provider, "Duplicate payment notification ignored");
            return Ok(NotificationOutcome::AlreadyPaid);
        }

        if !notification.success {
            self.orders
                .mark_failed(order.id, &notification.message)
                .await?;
            info!(order_id = %order.id, %provider, message = %notification.message, "Payment failed");
            return Ok(NotificationOutcome::Failed);
        }

        if notification.amount != order.total {
            warn!(
                order_id = %order.id,
                %provider,
                expected = order.total,
                received = notification.amount,
                "Payment amount mismatch"
            );
            let reason = format!(
                "Amount mismatch: expected {}, received {}",
                order.total, notification.amount
            );
            self.orders.mark_failed(order.id, &reason).await?;
            return Ok(NotificationOutcome::AmountMismatch);
        }

        let note = match &notification.transaction_id {
            Some(tx) => format!("{provider} transaction {tx}"),
            None => provider.to_string(),
        };
        self.orders.mark_paid(order.id, &note).await?;
        info!(order_id = %order.id, %provider, "Payment confirmed");

        Ok(NotificationOutcome::Paid)
    }
}
