use async_trait::async_trait;

use crate::catalog::application::ports::incoming::use_cases::{
    ListCategoriesError, ListCategoriesUseCase,
};
use crate::catalog::application::ports::outgoing::ProductQuery;

pub struct ListCategoriesService<Q>
where
    Q: ProductQuery,
{
    query: Q,
}

impl<Q> ListCategoriesService<Q>
where
    Q: ProductQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListCategoriesUseCase for ListCategoriesService<Q>
where
    Q: ProductQuery + Send + Sync,
{
    async fn execute(&self) -> Result<Vec<String>, ListCategoriesError> {
        self.query
            .categories()
            .await
            .map_err(|e| ListCategoriesError::QueryFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::application::domain::entities::sample_product;
    use crate::catalog::application::service::test_support::InMemoryCatalog;

    #[tokio::test]
    async fn returns_distinct_categories() {
        let mut vase = sample_product("Vase", 1, 1);
        vase.category = "Accessories".to_string();
        let catalog = InMemoryCatalog::with(vec![
            sample_product("Rose", 1, 1),
            sample_product("Tulip", 1, 1),
            vase,
        ]);

        let categories = ListCategoriesService::new(catalog).execute().await.unwrap();

        assert_eq!(categories, vec!["Accessories", "Bouquet"]);
    }
}
