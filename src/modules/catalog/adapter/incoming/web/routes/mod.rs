mod admin_products;
mod list_products;
mod get_product;

pub use admin_products::*;
pub use get_product::*;
pub use list_products::*;
