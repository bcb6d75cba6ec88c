mod create_product;
mod delete_product;
mod get_product;
mod list_categories;
mod list_products;
mod update_product;

pub use create_product::{CreateProductError, CreateProductUseCase};
pub use delete_product::{DeleteProductError, DeleteProductUseCase};
pub use get_product::{GetProductError, GetProductUseCase};
pub use list_categories::{ListCategoriesError, ListCategoriesUseCase};
pub use list_products::{ListProductsError, ListProductsUseCase};
pub use update_product::{UpdateProductError, UpdateProductUseCase};
