use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::application::domain::entities::{User, UserId, UserRole};
use crate::auth::application::ports::outgoing::{UserQuery, UserQueryError};

#[derive(Clone, Debug, Serialize, utoipa::ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: UserRole,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            role: user.role,
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, thiserror::Error, Clone)]
pub enum FetchUserError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Query error: {0}")]
    QueryError(#[from] UserQueryError),
}

#[async_trait]
pub trait FetchUserProfileUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<UserProfile, FetchUserError>;
}

#[derive(Clone)]
pub struct FetchUserProfileService {
    query: Arc<dyn UserQuery>,
}

impl FetchUserProfileService {
    pub fn new(query: Arc<dyn UserQuery>) -> Self {
        Self { query }
    }
}

#[async_trait]
impl FetchUserProfileUseCase for FetchUserProfileService {
    async fn execute(&self, user_id: UserId) -> Result<UserProfile, FetchUserError> {
        self.query
            .find_by_id(user_id)
            .await?
            .filter(|u| !u.is_deleted)
            .map(UserProfile::from)
            .ok_or(FetchUserError::UserNotFound(user_id))
    }
}
