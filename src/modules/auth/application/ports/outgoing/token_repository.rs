use crate::modules::auth::application::domain::entities::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenRepositoryError {
    #[error("Token store error: {0}")]
    StoreError(String),
}

/// Revocation list for refresh tokens. Only SHA-256 hashes are stored.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn blacklist_token(
        &self,
        token_hash: String,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError>;

    async fn is_token_blacklisted(&self, token_hash: &str) -> Result<bool, TokenRepositoryError>;

    /// Invalidates every refresh token issued to the user before now.
    async fn revoke_all_user_tokens(&self, user_id: UserId) -> Result<(), TokenRepositoryError>;

    /// Unix timestamp of the last bulk revocation, if one is still in effect.
    async fn revoked_before(&self, user_id: UserId) -> Result<Option<i64>, TokenRepositoryError>;
}
