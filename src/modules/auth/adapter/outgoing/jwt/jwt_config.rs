use std::env;

pub const MIN_SECRET_LEN: usize = 32;
pub const MAX_ACCESS_EXPIRY: i64 = 86_400;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64,       // seconds
    pub refresh_token_expiry: i64,      // seconds
    pub verification_token_expiry: i64, // seconds
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JwtConfigError {
    #[error("JWT_SECRET must be set")]
    MissingSecret,

    #[error("JWT_SECRET must be at least {MIN_SECRET_LEN} characters long for HS256")]
    SecretTooShort,

    #[error("Invalid {0} value")]
    InvalidNumber(&'static str),

    #[error("JWT_ACCESS_EXPIRY must be between 1 and {MAX_ACCESS_EXPIRY} seconds")]
    AccessExpiryOutOfRange,

    #[error("JWT_REFRESH_EXPIRY must be greater than JWT_ACCESS_EXPIRY")]
    RefreshNotLongerThanAccess,

    #[error("JWT_VERIFICATION_EXPIRY must be positive")]
    VerificationExpiryOutOfRange,
}

impl JwtConfig {
    fn parse_expiry(key: &'static str, default: i64) -> Result<i64, JwtConfigError> {
        match env::var(key) {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| JwtConfigError::InvalidNumber(key)),
            Err(_) => Ok(default),
        }
    }

    pub fn from_env() -> Result<Self, JwtConfigError> {
        let secret_key = env::var("JWT_SECRET").map_err(|_| JwtConfigError::MissingSecret)?;

        let config = Self {
            secret_key,
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "storefront".to_string()),
            access_token_expiry: Self::parse_expiry("JWT_ACCESS_EXPIRY", 1800)?,
            refresh_token_expiry: Self::parse_expiry("JWT_REFRESH_EXPIRY", 604_800)?,
            verification_token_expiry: Self::parse_expiry("JWT_VERIFICATION_EXPIRY", 86_400)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), JwtConfigError> {
        if self.secret_key.len() < MIN_SECRET_LEN {
            return Err(JwtConfigError::SecretTooShort);
        }
        if self.access_token_expiry <= 0 || self.access_token_expiry > MAX_ACCESS_EXPIRY {
            return Err(JwtConfigError::AccessExpiryOutOfRange);
        }
        if self.refresh_token_expiry <= self.access_token_expiry {
            return Err(JwtConfigError::RefreshNotLongerThanAccess);
        }
        if self.verification_token_expiry <= 0 {
            return Err(JwtConfigError::VerificationExpiryOutOfRange);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret_key: "a".repeat(32),
            issuer: "storefront".to_string(),
            access_token_expiry: 1800,
            refresh_token_expiry: 604_800,
            verification_token_expiry: 86_400,
        }
    }

    #[test]
    fn accepts_sane_values() {
        assert_eq!(config().validate(), Ok(()));
    }

    #[test]
    fn rejects_short_secret() {
        let c = JwtConfig {
            secret_key: "short".to_string(),
            ..config()
        };
        assert_eq!(c.validate(), Err(JwtConfigError::SecretTooShort));
    }

    #[test]
    fn rejects_access_expiry_over_a_day() {
        let c = JwtConfig {
            access_token_expiry: MAX_ACCESS_EXPIRY + 1,
            refresh_token_expiry: MAX_ACCESS_EXPIRY * 2,
            ..config()
        };
        assert_eq!(c.validate(), Err(JwtConfigError::AccessExpiryOutOfRange));
    }

    #[test]
    fn rejects_refresh_shorter_than_access() {
        let c = JwtConfig {
            refresh_token_expiry: 60,
            ..config()
        };
        assert_eq!(c.validate(), Err(JwtConfigError::RefreshNotLongerThanAccess));
    }
}
