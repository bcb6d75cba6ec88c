use std::sync::Arc;

use crate::catalog::application::ports::incoming::use_cases::{
    CreateProductUseCase, DeleteProductUseCase, GetProductUseCase, ListCategoriesUseCase,
    ListProductsUseCase, UpdateProductUseCase,
};

#[derive(Clone)]
pub struct CatalogUseCases {
    pub list: Arc<dyn ListProductsUseCase + Send + Sync>,
    pub get: Arc<dyn GetProductUseCase + Send + Sync>,
    pub create: Arc<dyn CreateProductUseCase + Send + Sync>,
    pub update: Arc<dyn UpdateProductUseCase + Send + Sync>,
    pub delete: Arc<dyn DeleteProductUseCase + Send + Sync>,
    pub categories: Arc<dyn ListCategoriesUseCase + Send + Sync>,
}
