use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use crate::catalog::application::domain::entities::{Product, ProductListFilter, ProductSort};
use crate::catalog::application::domain::product_rules::{NewProduct, ProductPatch};
use crate::catalog::application::ports::outgoing::{
    ProductQuery, ProductQueryError, ProductRepository, ProductRepositoryError,
};
use crate::shared::pagination::{PageRequest, PageResult};

/// Vec-backed catalog implementing both ports.
#[derive(Default)]
pub struct InMemoryCatalog {
    pub products: Mutex<Vec<Product>>,
    pub fail: bool,
}

impl InMemoryCatalog {
    pub fn with(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            products: Mutex::new(vec![]),
            fail: true,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<Product> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    fn visible(&self) -> Vec<Product> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| !p.is_deleted)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProductQuery for InMemoryCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, ProductQueryError> {
        if self.fail {
            return Err(ProductQueryError::DatabaseError("db down".to_string()));
        }
        Ok(self.visible().into_iter().find(|p| p.id == id))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, ProductQueryError> {
        if self.fail {
            return Err(ProductQueryError::DatabaseError("db down".to_string()));
        }
        Ok(self
            .visible()
            .into_iter()
            .filter(|p| ids.contains(&p.id))
            .collect())
    }

    async fn list(
        &self,
        _filter: ProductListFilter,
        _sort: ProductSort,
        page: PageRequest,
    ) -> Result<PageResult<Product>, ProductQueryError> {
        if self.fail {
            return Err(ProductQueryError::DatabaseError("db down".to_string()));
        }
        let items = self.visible();
        let total = items.len() as u64;
        Ok(PageResult::new(items, page, total))
    }

    async fn categories(&self) -> Result<Vec<String>, ProductQueryError> {
        if self.fail {
            return Err(ProductQueryError::DatabaseError("db down".to_string()));
        }
        let mut categories: Vec<String> = self.visible().into_iter().map(|p| p.category).collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductRepositoryError> {
        if self.fail {
            return Err(ProductRepositoryError::DatabaseError("db down".to_string()));
        }
        let now = Utc::now();
        let created = Product {
            id: Uuid::new_v4(),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            product_type: product.product_type,
            stock: product.stock,
            images: product.images,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.products.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, ProductRepositoryError> {
        if self.fail {
            return Err(ProductRepositoryError::DatabaseError("db down".to_string()));
        }
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == id && !p.is_deleted)
            .ok_or(ProductRepositoryError::NotFound)?;
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        Ok(product.clone())
    }

    async fn soft_delete_product(&self, id: Uuid) -> Result<(), ProductRepositoryError> {
        if self.fail {
            return Err(ProductRepositoryError::DatabaseError("db down".to_string()));
        }
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == id && !p.is_deleted)
            .ok_or(ProductRepositoryError::NotFound)?;
        product.is_deleted = true;
        Ok(())
    }
}
