pub mod product_query;
pub mod product_repository;

pub use product_query::{ProductQuery, ProductQueryError};
pub use product_repository::{ProductRepository, ProductRepositoryError};
