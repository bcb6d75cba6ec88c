use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::application::ports::outgoing::{UserListFilter, UserQuery, UserQueryError};
use crate::auth::application::use_cases::fetch_profile::UserProfile;
use crate::shared::pagination::{PageRequest, PageResult};

#[derive(Debug, thiserror::Error, Clone)]
pub enum ListUsersError {
    #[error("Query error: {0}")]
    QueryError(#[from] UserQueryError),
}

#[async_trait]
pub trait ListUsersUseCase: Send + Sync {
    async fn execute(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<PageResult<UserProfile>, ListUsersError>;
}

#[derive(Clone)]
pub struct ListUsersService {
    query: Arc<dyn UserQuery>,
}

impl ListUsersService {
    pub fn new(query: Arc<dyn UserQuery>) -> Self {
        Self { query }
    }
}

#[async_trait]
impl ListUsersUseCase for ListUsersService {
    async fn execute(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<PageResult<UserProfile>, ListUsersError> {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let users = self
            .query
            .list_users(UserListFilter { search }, page)
            .await?;
        Ok(users.map(UserProfile::from))
    }
}
