mod create_product_service;
mod delete_product_service;
mod get_product_service;
mod list_categories_service;
mod list_products_service;
mod update_product_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use create_product_service::CreateProductService;
pub use delete_product_service::DeleteProductService;
pub use get_product_service::GetProductService;
pub use list_categories_service::ListCategoriesService;
pub use list_products_service::ListProductsService;
pub use update_product_service::UpdateProductService;
