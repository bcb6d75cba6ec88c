use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use async_trait::async_trait;
use rand_core::OsRng;
use std::env;

use crate::auth::application::ports::outgoing::password_hasher::{
    HashError, PasswordHasher as HasherTrait,
};

pub const DEFAULT_MEMORY_KIB: u32 = 19 * 1024;
pub const DEFAULT_ITERATIONS: u32 = 2;
pub const DEFAULT_PARALLELISM: u32 = 1;

#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid Argon2 parameters: {0}")]
pub struct Argon2ConfigError(String);

/// Argon2id hasher. The salt and parameters travel inside the PHC string,
/// so hashes made with older settings still verify.
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
    #[cfg(test)]
    salt_override: Option<SaltString>,
}

impl Argon2Hasher {
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, Argon2ConfigError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| Argon2ConfigError(e.to_string()))?;

        Ok(Self {
            params,
            #[cfg(test)]
            salt_override: None,
        })
    }

    /// Reads `ARGON2_MEMORY_KIB`, `ARGON2_ITERATIONS` and `ARGON2_PARALLELISM`.
    pub fn from_env() -> Result<Self, Argon2ConfigError> {
        fn read(key: &str, default: u32) -> u32 {
            env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        Self::with_params(
            read("ARGON2_MEMORY_KIB", DEFAULT_MEMORY_KIB),
            read("ARGON2_ITERATIONS", DEFAULT_ITERATIONS),
            read("ARGON2_PARALLELISM", DEFAULT_PARALLELISM),
        )
    }

    #[cfg(test)]
    pub fn fast() -> Self {
        Self::with_params(1024, 1, 1).unwrap()
    }

    #[cfg(test)]
    pub fn with_fixed_salt(salt: &str) -> Self {
        Self {
            params: Params::new(1024, 1, 1, None).unwrap(),
            salt_override: Some(SaltString::from_b64(salt).unwrap()),
        }
    }
}

#[async_trait]
impl HasherTrait for Argon2Hasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        let password = password.to_string();
        let params = self.params.clone();

        #[cfg(test)]
        let salt_override = self.salt_override.clone();

        tokio::task::spawn_blocking(move || {
            let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

            #[cfg(test)]
            let salt = salt_override.unwrap_or_else(|| SaltString::generate(&mut OsRng));

            #[cfg(not(test))]
            let salt = SaltString::generate(&mut OsRng);

            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|_| HashError::HashFailed)
        })
        .await
        .map_err(|_| HashError::TaskFailed)?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&hash).map_err(|_| HashError::VerifyFailed)?;

            match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
                Ok(_) => Ok(true),
                Err(PasswordHashError::Password) => Ok(false),
                Err(_) => Err(HashError::VerifyFailed),
            }
        })
        .await
        .map_err(|_| HashError::TaskFailed)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_verifies_only_the_original_password() {
        let hasher = Argon2Hasher::fast();

        let hash = hasher.hash_password("shopper2024").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("shopper2024", &hash).await.unwrap());
        assert!(!hasher.verify_password("shopper2025", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn each_hash_gets_its_own_salt() {
        let hasher = Argon2Hasher::fast();
        let a = hasher.hash_password("shopper2024").await.unwrap();
        let b = hasher.hash_password("shopper2024").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn invalid_hash_format_is_an_error() {
        let hasher = Argon2Hasher::fast();
        assert!(matches!(
            hasher.verify_password("pw", "invalid-hash").await,
            Err(HashError::VerifyFailed)
        ));
    }

    #[tokio::test]
    async fn too_short_salt_fails_hashing() {
        let bad_salt = SaltString::encode_b64(b"short").unwrap();
        let hasher = Argon2Hasher::with_fixed_salt(bad_salt.as_str());

        assert!(matches!(
            hasher.hash_password("abc123").await,
            Err(HashError::HashFailed)
        ));
    }

    #[test]
    fn zero_iterations_are_rejected() {
        assert!(Argon2Hasher::with_params(1024, 0, 1).is_err());
    }
}
