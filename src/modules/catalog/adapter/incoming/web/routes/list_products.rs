use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::catalog::application::domain::entities::{Product, ProductListFilter, ProductSort};
use crate::shared::api::ApiResponse;
use crate::shared::pagination::{PageRequest, PageResult};
use crate::AppState;

const DEFAULT_PER_PAGE: u32 = 12;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct ListProductsQuery {
    /// Case-insensitive match on name or description.
    pub search: Option<String>,
    pub category: Option<String>,
    pub product_type: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub in_stock: Option<bool>,
    #[param(inline)]
    pub sort: Option<ProductSort>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ListProductsQuery {
    fn into_parts(self) -> (ProductListFilter, ProductSort, PageRequest) {
        let filter = ProductListFilter {
            search: non_blank(self.search),
            category: non_blank(self.category),
            product_type: non_blank(self.product_type),
            min_price: self.min_price,
            max_price: self.max_price,
            in_stock: self.in_stock.unwrap_or(false),
        };
        let page = PageRequest::new(self.page, self.per_page, DEFAULT_PER_PAGE);
        (filter, self.sort.unwrap_or_default(), page)
    }
}

/// Browse the catalog
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Page of products", body = inline(SuccessResponse<PageResult<Product>>)),
        (status = 400, description = "Invalid query", body = ErrorResponse),
    )
)]
#[get("/api/products")]
pub async fn list_products_handler(
    query: web::Query<ListProductsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (filter, sort, page) = query.into_inner().into_parts();

    match data.catalog.list.execute(filter, sort, page).await {
        Ok(result) => ApiResponse::success(result),
        Err(e) => {
            error!(error = %e, "List products failed");
            ApiResponse::internal_error()
        }
    }
}

/// Distinct categories of visible products
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "products",
    responses(
        (status = 200, description = "Category names", body = inline(SuccessResponse<Vec<String>>)),
    )
)]
#[get("/api/categories")]
pub async fn list_categories_handler(data: web::Data<AppState>) -> impl Responder {
    match data.catalog.categories.execute().await {
        Ok(categories) => ApiResponse::success(categories),
        Err(e) => {
            error!(error = %e, "List categories failed");
            ApiResponse::internal_error()
        }
    }
}
