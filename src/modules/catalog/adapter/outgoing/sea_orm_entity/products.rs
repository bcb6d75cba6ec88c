use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue, Set};
use serde::{Deserialize, Serialize};

use crate::catalog::application::domain::entities::Product;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub price: i64,

    #[sea_orm(column_type = "Text")]
    pub category: String,

    #[sea_orm(column_type = "Text")]
    pub product_type: String,

    pub stock: i32,

    /// Array of image URLs.
    #[sea_orm(column_type = "JsonBinary")]
    pub images: Json,

    pub is_deleted: bool,

    #[sea_orm(column_type = "TimestampWithTimeZone")]
    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(column_type = "TimestampWithTimeZone")]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let ActiveValue::Set(name) = &self.name {
            self.name = Set(name.trim().to_string());
        }

        #[cfg(feature = "no_db_triggers")]
        {
            use chrono::Utc;

            if !_insert {
                self.updated_at = Set(Utc::now().into());
            }
        }

        Ok(self)
    }
}

impl TryFrom<Model> for Product {
    type Error = serde_json::Error;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Product {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            product_type: model.product_type,
            stock: model.stock,
            images: serde_json::from_value(model.images)?,
            is_deleted: model.is_deleted,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_model(id: Uuid, name: &str, price: i64, stock: i32) -> Model {
    let now = chrono::Utc::now().fixed_offset();
    Model {
        id,
        name: name.to_string(),
        description: String::new(),
        price,
        category: "Bouquet".to_string(),
        product_type: "Fresh flowers".to_string(),
        stock,
        images: serde_json::json!(["https://cdn.example.com/p.jpg"]),
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}
