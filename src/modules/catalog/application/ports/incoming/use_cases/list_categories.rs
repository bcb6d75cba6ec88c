use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListCategoriesError {
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait ListCategoriesUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<String>, ListCategoriesError>;
}
