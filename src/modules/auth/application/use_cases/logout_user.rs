use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::auth::application::helpers::opaque_token::hash_token;
use crate::auth::application::ports::outgoing::{TokenProvider, TokenRepository, TokenType};
use crate::auth::application::use_cases::refresh_token::claims_expiry;

#[derive(Debug, Clone, Default)]
pub struct LogoutRequest {
    refresh_token: Option<String>,
}

impl LogoutRequest {
    pub fn new(refresh_token: Option<String>) -> Self {
        Self {
            refresh_token: refresh_token
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LogoutResponse {
    pub message: String,
}

/// Logout never fails from the caller's point of view.
#[async_trait]
pub trait ILogoutUseCase: Send + Sync {
    async fn execute(&self, request: LogoutRequest) -> LogoutResponse;
}

#[derive(Clone)]
pub struct LogoutUseCase {
    token_repository: Arc<dyn TokenRepository>,
    token_provider: Arc<dyn TokenProvider>,
}

impl LogoutUseCase {
    pub fn new(
        token_repository: Arc<dyn TokenRepository>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            token_repository,
            token_provider,
        }
    }
}

#[async_trait]
impl ILogoutUseCase for LogoutUseCase {
    async fn execute(&self, request: LogoutRequest) -> LogoutResponse {
        if let Some(refresh_token) = request.refresh_token() {
            match self.token_provider.verify_token(refresh_token) {
                Ok(claims) if claims.is_type(TokenType::Refresh) => {
                    let expires_at =
                        claims_expiry(claims.exp, self.token_provider.refresh_token_ttl());

                    match self
                        .token_repository
                        .blacklist_token(hash_token(refresh_token), claims.sub, expires_at)
                        .await
                    {
                        Ok(()) => info!(user_id = %claims.sub, "Refresh token revoked"),
                        Err(e) => warn!(user_id = %claims.sub, "Failed to revoke refresh token: {}", e),
                    }
                }
                Ok(_) => warn!("Logout called with a non-refresh token"),
                Err(e) => warn!("Failed to verify token during logout: {}", e),
            }
        }

        LogoutResponse {
            message: "Logged out successfully".to_string(),
        }
    }
}
