use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::review::application::domain::entities::Review;

/// Unique on (order_id, product_id).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    #[sea_orm(column_type = "Uuid")]
    pub user_id: Uuid,

    #[sea_orm(column_type = "Uuid")]
    pub order_id: Uuid,

    #[sea_orm(column_type = "Uuid")]
    pub product_id: Uuid,

    pub rating: i16,

    #[sea_orm(column_type = "Text")]
    pub comment: String,

    #[sea_orm(column_type = "TimestampWithTimeZone")]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::modules::order::adapter::outgoing::sea_orm_entity::orders::Entity",
        from = "Column::OrderId",
        to = "crate::modules::order::adapter::outgoing::sea_orm_entity::orders::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Orders,

    #[sea_orm(
        belongs_to = "crate::modules::catalog::adapter::outgoing::sea_orm_entity::products::Entity",
        from = "Column::ProductId",
        to = "crate::modules::catalog::adapter::outgoing::sea_orm_entity::products::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Products,
}

impl Related<crate::modules::catalog::adapter::outgoing::sea_orm_entity::products::Entity>
    for Entity
{
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Review {
    fn from(model: Model) -> Self {
        Review {
            id: model.id,
            user_id: model.user_id,
            order_id: model.order_id,
            product_id: model.product_id,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at.into(),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_model(product_id: Uuid, rating: i16) -> Model {
    Model {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        order_id: Uuid::new_v4(),
        product_id,
        rating,
        comment: "Lovely".to_string(),
        created_at: chrono::Utc::now().into(),
    }
}
