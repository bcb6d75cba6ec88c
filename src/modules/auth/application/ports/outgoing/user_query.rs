use crate::modules::auth::application::domain::entities::{User, UserId};
use crate::shared::pagination::{PageRequest, PageResult};
use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, Default)]
pub struct UserListFilter {
    /// Case-insensitive match against name or email.
    pub search: Option<String>,
}

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError>;

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, UserQueryError>;

    async fn list_users(
        &self,
        filter: UserListFilter,
        page: PageRequest,
    ) -> Result<PageResult<User>, UserQueryError>;
}
