use async_trait::async_trait;

use crate::catalog::application::domain::entities::{Product, ProductListFilter, ProductSort};
use crate::catalog::application::ports::incoming::use_cases::{
    ListProductsError, ListProductsUseCase,
};
use crate::catalog::application::ports::outgoing::ProductQuery;
use crate::shared::pagination::{PageRequest, PageResult};

pub struct ListProductsService<Q>
where
    Q: ProductQuery,
{
    query: Q,
}

impl<Q> ListProductsService<Q>
where
    Q: ProductQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListProductsUseCase for ListProductsService<Q>
where
    Q: ProductQuery + Send + Sync,
{
    async fn execute(
        &self,
        mut filter: ProductListFilter,
        sort: ProductSort,
        page: PageRequest,
    ) -> Result<PageResult<Product>, ListProductsError> {
        filter.search = filter
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        // An inverted range can never match; skip the round trip.
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            if min > max {
                return Ok(PageResult::new(vec![], page, 0));
            }
        }

        self.query
            .list(filter, sort, page)
            .await
            .map_err(ListProductsError::from)
    }
}
