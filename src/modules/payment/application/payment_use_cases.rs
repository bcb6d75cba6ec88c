use std::sync::Arc;

use crate::payment::application::ports::incoming::use_cases::{
    CreatePaymentUseCase, HandleNotificationUseCase,
};

#[derive(Clone)]
pub struct PaymentUseCases {
    pub create: Arc<dyn CreatePaymentUseCase + Send + Sync>,
    pub notify: Arc<dyn HandleNotificationUseCase + Send + Sync>,
}
