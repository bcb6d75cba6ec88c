use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::auth::application::domain::entities::{UserId, UserRole};
use crate::auth::application::ports::outgoing::token_provider::{
    TokenClaims, TokenError, TokenProvider, TokenType,
};

use super::jwt_config::JwtConfig;

#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.config.issuer)
            .finish()
    }
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn generate_token(
        &self,
        user_id: UserId,
        is_verified: bool,
        role: UserRole,
        token_type: TokenType,
        expiry_seconds: i64,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(expiry_seconds);

        let claims = TokenClaims {
            sub: user_id,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            token_type: token_type.as_str().to_string(),
            is_verified,
            role,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))
    }
}

impl TokenProvider for JwtTokenService {
    fn generate_access_token(
        &self,
        user_id: UserId,
        is_verified: bool,
        role: UserRole,
    ) -> Result<String, TokenError> {
        self.generate_token(
            user_id,
            is_verified,
            role,
            TokenType::Access,
            self.config.access_token_expiry,
        )
    }

    fn generate_refresh_token(
        &self,
        user_id: UserId,
        is_verified: bool,
        role: UserRole,
    ) -> Result<String, TokenError> {
        self.generate_token(
            user_id,
            is_verified,
            role,
            TokenType::Refresh,
            self.config.refresh_token_expiry,
        )
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.validate_nbf = true;

        let decoded =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token verification failed: Token expired");
                        TokenError::TokenExpired
                    }
                    ErrorKind::ImmatureSignature => {
                        tracing::warn!("Token verification failed: Token not yet valid");
                        TokenError::TokenNotYetValid
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::error!("Security alert: Invalid token signature detected");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm => {
                        tracing::error!("Security alert: Malformed or invalid algorithm token");
                        TokenError::MalformedToken
                    }
                    _ => {
                        tracing::warn!("Token verification failed: {}", e);
                        TokenError::MalformedToken
                    }
                }
            })?;

        Ok(decoded.claims)
    }

    fn generate_verification_token(&self, user_id: UserId) -> Result<String, TokenError> {
        self.generate_token(
            user_id,
            false,
            UserRole::Customer,
            TokenType::Verification,
            self.config.verification_token_expiry,
        )
    }

    fn verify_verification_token(&self, token: &str) -> Result<UserId, TokenError> {
        let claims = self.verify_token(token)?;

        if !claims.is_type(TokenType::Verification) {
            tracing::warn!(
                "Token type mismatch: expected 'verification', got '{}'",
                claims.token_type
            );
            return Err(TokenError::InvalidTokenType("verification".to_string()));
        }

        Ok(claims.sub)
    }

    fn refresh_token_ttl(&self) -> i64 {
        self.config.refresh_token_expiry
    }

    fn access_token_ttl(&self) -> i64 {
        self.config.access_token_expiry
    }
}
