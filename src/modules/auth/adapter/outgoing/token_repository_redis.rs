use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::token_repository::{
    TokenRepository, TokenRepositoryError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;

/// Redis-backed revocation list.
///
/// ```text
/// auth:blacklist:token:{token_hash}  -> "{user_id}"   TTL = token remaining lifetime
/// auth:revoked_before:user:{user_id} -> unix seconds  TTL = refresh token lifetime
/// ```
///
/// A token is revoked when its hash key exists, or when it was issued before
/// the user's `revoked_before` mark. Expiry is left to Redis TTLs.
#[derive(Clone)]
pub struct RedisTokenRepository {
    pool: Arc<Pool>,
    session_ttl_secs: i64,
}

impl RedisTokenRepository {
    /// `session_ttl_secs` should match the refresh token lifetime.
    pub fn new(pool: Arc<Pool>, session_ttl_secs: i64) -> Self {
        Self {
            pool,
            session_ttl_secs,
        }
    }

    pub(crate) fn token_key(token_hash: &str) -> String {
        format!("auth:blacklist:token:{token_hash}")
    }

    pub(crate) fn revoked_before_key(user_id: UserId) -> String {
        format!("auth:revoked_before:user:{user_id}")
    }

    pub(crate) fn ttl_until(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<i64> {
        let ttl = (expires_at - now).num_seconds();
        (ttl > 0).then_some(ttl)
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, TokenRepositoryError> {
        self.pool
            .get()
            .await
            .map_err(|e| TokenRepositoryError::StoreError(format!("Pool error: {}", e)))
    }
}

#[async_trait]
impl TokenRepository for RedisTokenRepository {
    async fn blacklist_token(
        &self,
        token_hash: String,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError> {
        // An already-expired token cannot be used anyway.
        let Some(ttl) = Self::ttl_until(expires_at, Utc::now()) else {
            return Ok(());
        };

        let mut conn = self.get_conn().await?;
        conn.set_ex::<_, _, ()>(Self::token_key(&token_hash), user_id.to_string(), ttl as u64)
            .await
            .map_err(|e| TokenRepositoryError::StoreError(e.to_string()))?;

        Ok(())
    }

    async fn is_token_blacklisted(&self, token_hash: &str) -> Result<bool, TokenRepositoryError> {
        let mut conn = self.get_conn().await?;

        conn.exists(Self::token_key(token_hash))
            .await
            .map_err(|e| TokenRepositoryError::StoreError(e.to_string()))
    }

    async fn revoke_all_user_tokens(&self, user_id: UserId) -> Result<(), TokenRepositoryError> {
        let mut conn = self.get_conn().await?;

        conn.set_ex::<_, _, ()>(
            Self::revoked_before_key(user_id),
            Utc::now().timestamp(),
            self.session_ttl_secs.max(1) as u64,
        )
        .await
        .map_err(|e| TokenRepositoryError::StoreError(e.to_string()))?;

        tracing::info!(user_id = %user_id, "All sessions revoked");
        Ok(())
    }

    async fn revoked_before(&self, user_id: UserId) -> Result<Option<i64>, TokenRepositoryError> {
        let mut conn = self.get_conn().await?;

        conn.get(Self::revoked_before_key(user_id))
            .await
            .map_err(|e| TokenRepositoryError::StoreError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    #[test]
    fn keys_are_namespaced() {
        let id = UserId::from(Uuid::nil());
        assert_eq!(
            RedisTokenRepository::token_key("abc"),
            "auth:blacklist:token:abc"
        );
        assert_eq!(
            RedisTokenRepository::revoked_before_key(id),
            "auth:revoked_before:user:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn ttl_is_remaining_lifetime() {
        let now = Utc::now();
        assert_eq!(
            RedisTokenRepository::ttl_until(now + Duration::seconds(90), now),
            Some(90)
        );
        assert_eq!(RedisTokenRepository::ttl_until(now, now), None);
        assert_eq!(
            RedisTokenRepository::ttl_until(now - Duration::seconds(5), now),
            None
        );
    }
}
