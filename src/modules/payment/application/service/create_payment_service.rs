use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserId;
use crate::order::application::domain::entities::{Order, OrderStatus, PayingStatus};
use crate::order::application::ports::incoming::use_cases::OrderPaymentUseCase;
use crate::payment::application::domain::entities::{
    PaymentLink, PaymentProvider, PaymentRequest,
};
use crate::payment::application::ports::incoming::use_cases::{
    CreatePaymentError, CreatePaymentUseCase,
};
use crate::payment::application::service::PaymentGateways;
use crate::shared::app_urls::AppUrls;

pub struct CreatePaymentService {
    orders: Arc<dyn OrderPaymentUseCase + Send + Sync>,
    gateways: PaymentGateways,
    urls: AppUrls,
}

impl CreatePaymentService {
    pub fn new(
        orders: Arc<dyn OrderPaymentUseCase + Send + Sync>,
        gateways: PaymentGateways,
        urls: AppUrls,
    ) -> Self {
        Self {
            orders,
            gateways,
            urls,
        }
    }

    fn ensure_payable(order: &Order, provider: PaymentProvider) -> Result<(), CreatePaymentError> {
        if order.status != OrderStatus::Draft {
            return Err(CreatePaymentError::NotPayable(format!(
                "order is {}",
                order.status
            )));
        }
        if !matches!(
            order.paying_status,
            PayingStatus::Unpaid | PayingStatus::Failed
        ) {
            return Err(CreatePaymentError::NotPayable(
                "order is already paid".to_string(),
            ));
        }
        if !provider.serves(order.payment_method) {
            return Err(CreatePaymentError::ProviderMismatch);
        }
        Ok(())
    }

    /// Short enough for PayOS' 25 character limit.
    fn description(order_id: Uuid) -> String {
        let simple = order_id.simple().to_string();
        format!("Thanh toan don {}", &simple[..8])
    }
}

#[async_trait]
impl CreatePaymentUseCase for CreatePaymentService {
    async fn execute(
        &self,
        order_id: Uuid,
        user_id: UserId,
        provider: PaymentProvider,
    ) -> Result<PaymentLink, CreatePaymentError> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .filter(|o| o.is_owned_by(user_id.value()))
            .ok_or(CreatePaymentError::OrderNotFound)?;

        Self::ensure_payable(&order, provider)?;

        let gateway = self
            .gateways
            .get(provider)
            .ok_or(CreatePaymentError::ProviderUnavailable(provider))?;

        let reference = gateway.new_reference(order.id, Utc::now());
        // Stored first so a fast callback can always find the order.
        self.orders.attach_reference(order.id, &reference).await?;

        let request = PaymentRequest {
            order_id: order.id,
            reference,
            amount: order.total,
            description: Self::description(order.id),
            return_url: self.urls.payment_return_url(order.id),
            cancel_url: self.urls.payment_cancel_url(order.id),
        };

        let link = gateway.create_payment(&request).await.map_err(|e| {
            warn!(%order_id, %provider, error = %e, "Payment link creation failed");
            CreatePaymentError::from(e)
        })?;

        info!(%order_id, %provider, reference = %link.reference, "Payment link created");
        Ok(link)
    }
}
