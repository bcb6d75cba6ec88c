use std::sync::Arc;

use crate::order::application::ports::incoming::use_cases::{
    ChangeOrderStatusUseCase, CompleteRefundUseCase, CreateOrderUseCase, GetOrderUseCase,
    ListOrdersUseCase, OrderPaymentUseCase, OrderStatsUseCase,
};

#[derive(Clone)]
pub struct OrderUseCases {
    pub create: Arc<dyn CreateOrderUseCase + Send + Sync>,
    pub get: Arc<dyn GetOrderUseCase + Send + Sync>,
    pub list: Arc<dyn ListOrdersUseCase + Send + Sync>,
    pub change_status: Arc<dyn ChangeOrderStatusUseCase + Send + Sync>,
    pub complete_refund: Arc<dyn CompleteRefundUseCase + Send + Sync>,
    pub stats: Arc<dyn OrderStatsUseCase + Send + Sync>,
    pub payment: Arc<dyn OrderPaymentUseCase + Send + Sync>,
}
