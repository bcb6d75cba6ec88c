use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A sellable item. Prices are whole VND; there is no minor unit.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[schema(example = 250000)]
    pub price: i64,
    pub category: String,
    pub product_type: String,
    pub stock: i32,
    pub images: Vec<String>,
    #[serde(skip_serializing)]
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn has_stock_for(&self, quantity: i32) -> bool {
        !self.is_deleted && self.stock >= quantity
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    NameAsc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub product_type: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub in_stock: bool,
}

#[cfg(test)]
pub(crate) fn sample_product(name: &str, price: i64, stock: i32) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: format!("{name} description"),
        price,
        category: "Bouquet".to_string(),
        product_type: "Fresh flowers".to_string(),
        stock,
        images: vec!["https://cdn.example.com/p.jpg".to_string()],
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}
