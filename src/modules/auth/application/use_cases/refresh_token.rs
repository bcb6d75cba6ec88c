use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::helpers::opaque_token::hash_token;
use crate::auth::application::ports::outgoing::{
    TokenError, TokenProvider, TokenRepository, TokenType, UserQuery,
};

// ========================= Refresh Token Request =========================
#[derive(Debug, Clone)]
pub struct RefreshTokenRequest {
    refresh_token: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RefreshTokenRequestError {
    #[error("Refresh token cannot be empty")]
    EmptyToken,
}

impl RefreshTokenRequest {
    pub fn new(refresh_token: String) -> Result<Self, RefreshTokenRequestError> {
        let refresh_token = refresh_token.trim();
        if refresh_token.is_empty() {
            return Err(RefreshTokenRequestError::EmptyToken);
        }

        Ok(Self {
            refresh_token: refresh_token.to_string(),
        })
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

// ====================== Refresh Token Error =============================
#[derive(Debug, Clone, thiserror::Error)]
pub enum RefreshTokenError {
    #[error("Refresh token has expired")]
    TokenExpired,

    #[error("Invalid refresh token")]
    TokenInvalid,

    #[error("Invalid token type")]
    InvalidTokenType,

    #[error("Refresh token has been revoked")]
    TokenRevoked,

    #[error("User no longer exists")]
    UserUnavailable,

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<TokenError> for RefreshTokenError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::TokenExpired => RefreshTokenError::TokenExpired,
            TokenError::InvalidTokenType(_) => RefreshTokenError::InvalidTokenType,
            TokenError::EncodingError(msg) => RefreshTokenError::TokenGenerationFailed(msg),
            TokenError::TokenNotYetValid
            | TokenError::InvalidSignature
            | TokenError::MalformedToken => RefreshTokenError::TokenInvalid,
        }
    }
}

// ============================ Refresh Token Response =========================
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

// ============================ Refresh Token Use Case =============================
#[async_trait]
pub trait IRefreshTokenUseCase: Send + Sync {
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError>;
}

/// Exchanges a refresh token for a new pair. The presented refresh token is
/// revoked so it cannot be replayed.
#[derive(Clone)]
pub struct RefreshTokenUseCase {
    token_provider: Arc<dyn TokenProvider>,
    token_repository: Arc<dyn TokenRepository>,
    user_query: Arc<dyn UserQuery>,
}

impl RefreshTokenUseCase {
    pub fn new(
        token_provider: Arc<dyn TokenProvider>,
        token_repository: Arc<dyn TokenRepository>,
        user_query: Arc<dyn UserQuery>,
    ) -> Self {
        Self {
            token_provider,
            token_repository,
            user_query,
        }
    }
}

pub(crate) fn claims_expiry(exp: i64, fallback_secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(exp, 0).unwrap_or_else(|| Utc::now() + Duration::seconds(fallback_secs))
}

#[async_trait]
impl IRefreshTokenUseCase for RefreshTokenUseCase {
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError> {
        // 1️⃣ Verify and decode
        let claims = self
            .token_provider
            .verify_token(request.refresh_token())?;

        if !claims.is_type(TokenType::Refresh) {
            return Err(RefreshTokenError::InvalidTokenType);
        }

        // 2️⃣ Reject revoked tokens
        let token_hash = hash_token(request.refresh_token());
        let revoked = self
            .token_repository
            .is_token_blacklisted(&token_hash)
            .await
            .map_err(|e| RefreshTokenError::StorageError(e.to_string()))?;
        let cutoff = self
            .token_repository
            .revoked_before(claims.sub)
            .await
            .map_err(|e| RefreshTokenError::StorageError(e.to_string()))?;
        if revoked || cutoff.is_some_and(|ts| claims.iat < ts) {
            tracing::warn!(user_id = %claims.sub, "Revoked refresh token presented");
            return Err(RefreshTokenError::TokenRevoked);
        }

        // 3️⃣ Reload the user so role and verification state are current
        let user = self
            .user_query
            .find_by_id(claims.sub)
            .await
            .map_err(|e| RefreshTokenError::StorageError(e.to_string()))?
            .filter(|u| !u.is_deleted)
            .ok_or(RefreshTokenError::UserUnavailable)?;
        let user_id = UserId::from(user.id);

        // 4️⃣ Issue new pair, revoke the old refresh token
        let access_token = self
            .token_provider
            .generate_access_token(user_id, user.is_verified, user.role)?;
        let refresh_token = self
            .token_provider
            .generate_refresh_token(user_id, user.is_verified, user.role)?;

        self.token_repository
            .blacklist_token(
                token_hash,
                user_id,
                claims_expiry(claims.exp, self.token_provider.refresh_token_ttl()),
            )
            .await
            .map_err(|e| RefreshTokenError::StorageError(e.to_string()))?;

        Ok(RefreshTokenResponse {
            access_token,
            refresh_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserRole;
    use crate::auth::application::use_cases::test_support::{
        sample_user, FakeTokens, InMemoryBlacklist, InMemoryUsers,
    };
    use uuid::Uuid;

    struct Fixture {
        uc: RefreshTokenUseCase,
        blacklist: Arc<InMemoryBlacklist>,
        user_id: Uuid,
    }

    fn fixture(role: UserRole, deleted: bool) -> Fixture {
        let mut user = sample_user("lan@example.com");
        user.role = role;
        user.is_deleted = deleted;
        let user_id = user.id;
        let blacklist = Arc::new(InMemoryBlacklist::default());
        let uc = RefreshTokenUseCase::new(
            Arc::new(FakeTokens),
            blacklist.clone(),
            Arc::new(InMemoryUsers::with(vec![user])),
        );
        Fixture {
            uc,
            blacklist,
            user_id,
        }
    }

    fn request(token: &str) -> RefreshTokenRequest {
        RefreshTokenRequest::new(token.to_string()).unwrap()
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(matches!(
            RefreshTokenRequest::new("   ".to_string()),
            Err(RefreshTokenRequestError::EmptyToken)
        ));
    }

    #[tokio::test]
    async fn issues_new_pair_with_current_role_and_revokes_old_token() {
        let f = fixture(UserRole::Admin, false);
        // The token still says customer; the stored user is now admin.
        let old = FakeTokens::token(TokenType::Refresh, f.user_id, true, UserRole::Customer);

        let response = f.uc.execute(request(&old)).await.unwrap();

        assert_eq!(
            response.access_token,
            FakeTokens::token(TokenType::Access, f.user_id, true, UserRole::Admin)
        );
        assert!(f.blacklist.hashes.lock().unwrap().contains(&hash_token(&old)));
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() {
        let f = fixture(UserRole::Customer, false);
        let token = FakeTokens::token(TokenType::Refresh, f.user_id, true, UserRole::Customer);
        f.blacklist.hashes.lock().unwrap().insert(hash_token(&token));

        assert!(matches!(
            f.uc.execute(request(&token)).await,
            Err(RefreshTokenError::TokenRevoked)
        ));
    }

    #[tokio::test]
    async fn bulk_revocation_rejects_older_tokens() {
        let f = fixture(UserRole::Customer, false);
        let token = FakeTokens::token(TokenType::Refresh, f.user_id, true, UserRole::Customer);
        // FakeTokens stamps iat with the current time.
        *f.blacklist.revoked_before.lock().unwrap() = Some(Utc::now().timestamp() + 10);

        assert!(matches!(
            f.uc.execute(request(&token)).await,
            Err(RefreshTokenError::TokenRevoked)
        ));
    }

    #[tokio::test]
    async fn replaying_a_rotated_token_fails() {
        let f = fixture(UserRole::Customer, false);
        let token = FakeTokens::token(TokenType::Refresh, f.user_id, true, UserRole::Customer);

        f.uc.execute(request(&token)).await.unwrap();

        assert!(matches!(
            f.uc.execute(request(&token)).await,
            Err(RefreshTokenError::TokenRevoked)
        ));
    }

    #[tokio::test]
    async fn access_token_cannot_refresh() {
        let f = fixture(UserRole::Customer, false);
        let token = FakeTokens::token(TokenType::Access, f.user_id, true, UserRole::Customer);

        assert!(matches!(
            f.uc.execute(request(&token)).await,
            Err(RefreshTokenError::InvalidTokenType)
        ));
    }

    #[tokio::test]
    async fn expired_token_is_reported() {
        let f = fixture(UserRole::Customer, false);
        assert!(matches!(
            f.uc.execute(request("expired")).await,
            Err(RefreshTokenError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn deleted_user_cannot_refresh() {
        let f = fixture(UserRole::Customer, true);
        let token = FakeTokens::token(TokenType::Refresh, f.user_id, true, UserRole::Customer);

        assert!(matches!(
            f.uc.execute(request(&token)).await,
            Err(RefreshTokenError::UserUnavailable)
        ));
    }
}
