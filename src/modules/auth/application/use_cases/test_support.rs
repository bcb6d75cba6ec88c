//! In-memory doubles for the auth ports, shared by the use case tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::{User, UserId, UserRole};
use crate::auth::application::ports::outgoing::{
    HashError, PasswordHasher, ProfileChanges, TokenClaims, TokenError, TokenProvider,
    TokenRepository, TokenRepositoryError, TokenType, UserListFilter, UserQuery, UserQueryError,
    UserRepository, UserRepositoryError,
};
use crate::email::application::ports::outgoing::{
    EmailRecipient, UserEmailNotificationError, UserEmailNotifier,
};
use crate::shared::pagination::{PageRequest, PageResult};

pub fn sample_user(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        name: "Nguyen Van A".to_string(),
        email: email.to_string(),
        password_hash: "hashed:secret123".to_string(),
        phone: None,
        address: None,
        role: UserRole::Customer,
        is_verified: true,
        is_deleted: false,
        reset_token_hash: None,
        reset_token_expires_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

// ──────────────────────────────────────────────────────────
// Users
// ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryUsers {
    pub users: Mutex<Vec<User>>,
    pub fail: bool,
}

impl InMemoryUsers {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    fn check(&self) -> Result<(), UserRepositoryError> {
        if self.fail {
            return Err(UserRepositoryError::DatabaseError("db down".to_string()));
        }
        Ok(())
    }

    fn modify<F>(&self, user_id: UserId, f: F) -> Result<User, UserRepositoryError>
    where
        F: FnOnce(&mut User),
    {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id.value())
            .ok_or(UserRepositoryError::UserNotFound)?;
        f(user);
        Ok(user.clone())
    }
}

#[async_trait]
impl UserQuery for InMemoryUsers {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError> {
        if self.fail {
            return Err(UserQueryError::DatabaseError("db down".to_string()));
        }
        Ok(self.get(user_id.value()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        if self.fail {
            return Err(UserQueryError::DatabaseError("db down".to_string()));
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, UserQueryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.reset_token_hash.as_deref() == Some(token_hash))
            .cloned())
    }

    async fn list_users(
        &self,
        filter: UserListFilter,
        page: PageRequest,
    ) -> Result<PageResult<User>, UserQueryError> {
        let users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| match &filter.search {
                Some(s) => u.email.contains(s.as_str()) || u.name.contains(s.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        let total = users.len() as u64;
        let items = users
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResult::new(items, page, total))
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(&self, user: User) -> Result<User, UserRepositoryError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserRepositoryError::UserAlreadyExists);
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn activate_user(&self, user_id: UserId) -> Result<(), UserRepositoryError> {
        self.modify(user_id, |u| u.is_verified = true).map(|_| ())
    }

    async fn update_password(
        &self,
        user_id: UserId,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        self.modify(user_id, |u| {
            u.password_hash = new_password_hash;
            u.reset_token_hash = None;
            u.reset_token_expires_at = None;
        })
        .map(|_| ())
    }

    async fn set_reset_token(
        &self,
        user_id: UserId,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        self.modify(user_id, |u| {
            u.reset_token_hash = Some(token_hash);
            u.reset_token_expires_at = Some(expires_at);
        })
        .map(|_| ())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<User, UserRepositoryError> {
        self.modify(user_id, |u| {
            if let Some(name) = changes.name {
                u.name = name;
            }
            if let Some(phone) = changes.phone {
                u.phone = Some(phone);
            }
            if let Some(address) = changes.address {
                u.address = Some(address);
            }
        })
    }
}

// ──────────────────────────────────────────────────────────
// Hashing
// ──────────────────────────────────────────────────────────

/// Stores `hashed:<password>` so tests can assert on what was hashed.
pub struct PrefixHasher;

#[async_trait]
impl PasswordHasher for PrefixHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        Ok(hash == format!("hashed:{password}"))
    }
}

pub struct FailingHasher;

#[async_trait]
impl PasswordHasher for FailingHasher {
    async fn hash_password(&self, _password: &str) -> Result<String, HashError> {
        Err(HashError::HashFailed)
    }

    async fn verify_password(&self, _password: &str, _hash: &str) -> Result<bool, HashError> {
        Err(HashError::VerifyFailed)
    }
}

// ──────────────────────────────────────────────────────────
// Tokens
// ──────────────────────────────────────────────────────────

/// Tokens look like `<type>:<uuid>:<verified>:<role>`; `expired` and `garbage` are special.
pub struct FakeTokens;

impl FakeTokens {
    pub fn token(token_type: TokenType, user_id: Uuid, verified: bool, role: UserRole) -> String {
        format!("{}:{}:{}:{}", token_type.as_str(), user_id, verified, role.as_str())
    }
}

impl TokenProvider for FakeTokens {
    fn generate_access_token(
        &self,
        user_id: UserId,
        is_verified: bool,
        role: UserRole,
    ) -> Result<String, TokenError> {
        Ok(Self::token(TokenType::Access, user_id.value(), is_verified, role))
    }

    fn generate_refresh_token(
        &self,
        user_id: UserId,
        is_verified: bool,
        role: UserRole,
    ) -> Result<String, TokenError> {
        Ok(Self::token(TokenType::Refresh, user_id.value(), is_verified, role))
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        if token == "expired" {
            return Err(TokenError::TokenExpired);
        }
        let parts: Vec<&str> = token.split(':').collect();
        if parts.len() != 4 {
            return Err(TokenError::MalformedToken);
        }
        let sub = Uuid::parse_str(parts[1]).map_err(|_| TokenError::MalformedToken)?;
        let now = Utc::now().timestamp();
        Ok(TokenClaims {
            sub: UserId::from(sub),
            exp: now + 3600,
            iat: now,
            nbf: now,
            token_type: parts[0].to_string(),
            is_verified: parts[2] == "true",
            role: UserRole::parse(parts[3]).unwrap_or_default(),
        })
    }

    fn generate_verification_token(&self, user_id: UserId) -> Result<String, TokenError> {
        Ok(Self::token(
            TokenType::Verification,
            user_id.value(),
            false,
            UserRole::Customer,
        ))
    }

    fn verify_verification_token(&self, token: &str) -> Result<UserId, TokenError> {
        let claims = self.verify_token(token)?;
        if !claims.is_type(TokenType::Verification) {
            return Err(TokenError::InvalidTokenType("verification".to_string()));
        }
        Ok(claims.sub)
    }

    fn refresh_token_ttl(&self) -> i64 {
        604_800
    }

    fn access_token_ttl(&self) -> i64 {
        3600
    }
}

#[derive(Default)]
pub struct InMemoryBlacklist {
    pub hashes: Mutex<HashSet<String>>,
    pub revoked_before: Mutex<Option<i64>>,
}

#[async_trait]
impl TokenRepository for InMemoryBlacklist {
    async fn blacklist_token(
        &self,
        token_hash: String,
        _user_id: UserId,
        _expires_at: DateTime<Utc>,
    ) -> Result<(), TokenRepositoryError> {
        self.hashes.lock().unwrap().insert(token_hash);
        Ok(())
    }

    async fn is_token_blacklisted(&self, token_hash: &str) -> Result<bool, TokenRepositoryError> {
        Ok(self.hashes.lock().unwrap().contains(token_hash))
    }

    async fn revoke_all_user_tokens(&self, _user_id: UserId) -> Result<(), TokenRepositoryError> {
        *self.revoked_before.lock().unwrap() = Some(Utc::now().timestamp());
        Ok(())
    }

    async fn revoked_before(&self, _user_id: UserId) -> Result<Option<i64>, TokenRepositoryError> {
        Ok(*self.revoked_before.lock().unwrap())
    }
}

// ──────────────────────────────────────────────────────────
// Email
// ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingUserNotifier {
    pub verifications: Mutex<Vec<String>>,
    pub resets: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

#[async_trait]
impl UserEmailNotifier for RecordingUserNotifier {
    async fn send_verification_email(
        &self,
        recipient: &EmailRecipient,
    ) -> Result<(), UserEmailNotificationError> {
        if self.fail {
            return Err(UserEmailNotificationError::EmailSendingFailed(
                "smtp down".to_string(),
            ));
        }
        self.verifications
            .lock()
            .unwrap()
            .push(recipient.email.clone());
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        recipient: &EmailRecipient,
        reset_token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        if self.fail {
            return Err(UserEmailNotificationError::EmailSendingFailed(
                "smtp down".to_string(),
            ));
        }
        self.resets
            .lock()
            .unwrap()
            .push((recipient.email.clone(), reset_token.to_string()));
        Ok(())
    }
}
