use std::collections::HashMap;
use std::sync::Arc;

use crate::payment::application::domain::entities::PaymentProvider;
use crate::payment::application::ports::outgoing::PaymentGateway;

/// The gateways configured for this deployment, keyed by provider.
#[derive(Clone, Default)]
pub struct PaymentGateways {
    gateways: HashMap<PaymentProvider, Arc<dyn PaymentGateway>>,
}

impl PaymentGateways {
    pub fn with(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.gateways.insert(gateway.provider(), gateway);
        self
    }

    pub fn get(&self, provider: PaymentProvider) -> Option<&Arc<dyn PaymentGateway>> {
        self.gateways.get(&provider)
    }

    pub fn providers(&self) -> Vec<PaymentProvider> {
        self.gateways.keys().copied().collect()
    }
}
