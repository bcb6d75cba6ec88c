pub mod entities;
pub mod product_rules;
