use std::env;

/// Public base URLs used to build links in emails and payment redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppUrls {
    pub api_base_url: String,
    pub storefront_url: String,
    pub admin_url: String,
}

impl AppUrls {
    pub fn new(api_base_url: &str, storefront_url: &str, admin_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            storefront_url: storefront_url.trim_end_matches('/').to_string(),
            admin_url: admin_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        let api = env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let storefront =
            env::var("STOREFRONT_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let admin = env::var("ADMIN_URL").unwrap_or_else(|_| "http://localhost:5174".to_string());
        Self::new(&api, &storefront, &admin)
    }

    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/api/auth/email-verification/{}", self.api_base_url, token)
    }

    pub fn password_reset_link(&self, token: &str) -> String {
        format!("{}/reset-password?token={}", self.storefront_url, token)
    }

    pub fn order_link(&self, order_id: uuid::Uuid) -> String {
        format!("{}/orders/{}", self.storefront_url, order_id)
    }

    pub fn payment_return_url(&self, order_id: uuid::Uuid) -> String {
        format!("{}/orders/{}/payment-result", self.storefront_url, order_id)
    }

    pub fn payment_cancel_url(&self, order_id: uuid::Uuid) -> String {
        format!("{}/orders/{}?payment=cancelled", self.storefront_url, order_id)
    }

    pub fn momo_ipn_url(&self) -> String {
        format!("{}/api/payments/momo/ipn", self.api_base_url)
    }
}

impl Default for AppUrls {
    fn default() -> Self {
        Self::new(
            "http://localhost:8080",
            "http://localhost:5173",
            "http://localhost:5174",
        )
    }
}
