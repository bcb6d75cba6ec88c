use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::auth::application::domain::entities::{User, UserId, UserRole};
use crate::auth::application::domain::password_policy::validate_password;
use crate::auth::application::ports::outgoing::{
    PasswordHasher, UserQuery, UserRepository, UserRepositoryError,
};

pub const MAX_NAME_LEN: usize = 100;

// ========================= Create User Input =========================
/// Validated registration payload. Email is trimmed and lower-cased.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    name: String,
    email: String,
    password: String,
}

impl CreateUserInput {
    pub fn new(name: String, email: String, password: String) -> Result<Self, CreateUserError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(CreateUserError::InvalidInput("Name is required".to_string()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(CreateUserError::InvalidInput(format!(
                "Name must not exceed {MAX_NAME_LEN} characters"
            )));
        }

        let email = email.trim().to_lowercase();
        if !EmailAddress::is_valid(&email) {
            return Err(CreateUserError::InvalidInput(
                "Invalid email format".to_string(),
            ));
        }

        validate_password(&password).map_err(|e| CreateUserError::InvalidInput(e.to_string()))?;

        Ok(Self {
            name,
            email,
            password,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl<'de> Deserialize<'de> for CreateUserInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            name: String,
            email: String,
            password: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        CreateUserInput::new(helper.name, helper.email, helper.password)
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone)]
pub struct CreateUserOutput {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&User> for CreateUserOutput {
    fn from(user: &User) -> Self {
        Self {
            user_id: UserId::from(user.id),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateUserError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ICreateUserUseCase: Send + Sync {
    async fn execute(&self, input: CreateUserInput) -> Result<CreateUserOutput, CreateUserError>;
}

#[derive(Clone)]
pub struct CreateUserUseCase {
    query: Arc<dyn UserQuery>,
    repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl CreateUserUseCase {
    pub fn new(
        query: Arc<dyn UserQuery>,
        repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl ICreateUserUseCase for CreateUserUseCase {
    async fn execute(&self, input: CreateUserInput) -> Result<CreateUserOutput, CreateUserError> {
        // 1️⃣ Reject emails that already belong to an account
        let existing = self
            .query
            .find_by_email(input.email())
            .await
            .map_err(|e| CreateUserError::RepositoryError(e.to_string()))?;
        if existing.is_some() {
            return Err(CreateUserError::EmailAlreadyExists);
        }

        // 2️⃣ Hash password
        let password_hash = self
            .password_hasher
            .hash_password(&input.password)
            .await
            .map_err(|e| CreateUserError::HashingFailed(e.to_string()))?;

        // 3️⃣ Persist
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            password_hash,
            phone: None,
            address: None,
            role: UserRole::Customer,
            is_verified: false,
            is_deleted: false,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .repository
            .create_user(user)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => CreateUserError::EmailAlreadyExists,
                other => CreateUserError::RepositoryError(other.to_string()),
            })?;

        tracing::info!(user_id = %created.id, "User account created");

        Ok(CreateUserOutput::from(&created))
    }
}
