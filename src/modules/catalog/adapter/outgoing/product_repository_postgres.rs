use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::catalog::adapter::outgoing::sea_orm_entity::products::{
    self, ActiveModel, Column, Entity,
};
use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::domain::product_rules::{NewProduct, ProductPatch};
use crate::catalog::application::ports::outgoing::{ProductRepository, ProductRepositoryError};

#[derive(Clone)]
pub struct ProductRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProductRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn load_active(&self, id: Uuid) -> Result<ActiveModel, ProductRepositoryError> {
        let model = Entity::find_by_id(id)
            .filter(Column::IsDeleted.eq(false))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(ProductRepositoryError::NotFound)?;

        Ok(model.into())
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryPostgres {
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductRepositoryError> {
        let active = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            category: Set(product.category),
            product_type: Set(product.product_type),
            stock: Set(product.stock),
            images: Set(to_json(&product.images)?),
            is_deleted: Set(false),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let model = active.insert(&*self.db).await.map_err(map_db_err)?;
        to_product(model)
    }

    async fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, ProductRepositoryError> {
        let mut active = self.load_active(id).await?;

        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(price) = patch.price {
            active.price = Set(price);
        }
        if let Some(category) = patch.category {
            active.category = Set(category);
        }
        if let Some(product_type) = patch.product_type {
            active.product_type = Set(product_type);
        }
        if let Some(stock) = patch.stock {
            active.stock = Set(stock);
        }
        if let Some(images) = patch.images {
            active.images = Set(to_json(&images)?);
        }

        let model = active.update(&*self.db).await.map_err(map_db_err)?;
        to_product(model)
    }

    async fn soft_delete_product(&self, id: Uuid) -> Result<(), ProductRepositoryError> {
        let mut active = self.load_active(id).await?;
        active.is_deleted = Set(true);
        active.update(&*self.db).await.map_err(map_db_err)?;
        Ok(())
    }
}

fn to_json(images: &[String]) -> Result<serde_json::Value, ProductRepositoryError> {
    serde_json::to_value(images).map_err(|e| ProductRepositoryError::SerializationError(e.to_string()))
}

fn to_product(model: products::Model) -> Result<Product, ProductRepositoryError> {
    Product::try_from(model).map_err(|e| ProductRepositoryError::SerializationError(e.to_string()))
}

fn map_db_err(e: DbErr) -> ProductRepositoryError {
    ProductRepositoryError::DatabaseError(e.to_string())
}
