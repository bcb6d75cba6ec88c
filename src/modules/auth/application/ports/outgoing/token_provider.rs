use crate::modules::auth::application::domain::entities::{UserId, UserRole};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token type, expected: {0}")]
    InvalidTokenType(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token encoding error: {0}")]
    EncodingError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Access,
    Refresh,
    Verification,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
            TokenType::Verification => "verification",
        }
    }
}

/// JWT claims shared by every token the service issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: UserId,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub token_type: String,
    pub is_verified: bool,
    #[serde(default)]
    pub role: UserRole,
}

impl TokenClaims {
    pub fn is_type(&self, token_type: TokenType) -> bool {
        self.token_type == token_type.as_str()
    }
}

pub trait TokenProvider: Send + Sync {
    fn generate_access_token(
        &self,
        user_id: UserId,
        is_verified: bool,
        role: UserRole,
    ) -> Result<String, TokenError>;

    fn generate_refresh_token(
        &self,
        user_id: UserId,
        is_verified: bool,
        role: UserRole,
    ) -> Result<String, TokenError>;

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError>;

    fn generate_verification_token(&self, user_id: UserId) -> Result<String, TokenError>;

    fn verify_verification_token(&self, token: &str) -> Result<UserId, TokenError>;

    /// Lifetime of refresh tokens in seconds, used for cookie max-age.
    fn refresh_token_ttl(&self) -> i64;

    fn access_token_ttl(&self) -> i64;
}
