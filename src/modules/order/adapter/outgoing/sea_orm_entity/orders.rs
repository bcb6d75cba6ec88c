use sea_orm::entity::prelude::*;
use sea_orm::ActiveModelBehavior;
use serde::{Deserialize, Serialize};

use crate::order::application::domain::entities::{
    HistoryEntry, Order, OrderItem, OrderStatus, PayingStatus, PaymentMethod, RefundStatus,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    #[sea_orm(column_type = "Uuid")]
    pub user_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub contact_email: String,

    /// Array of `OrderItem`.
    #[sea_orm(column_type = "JsonBinary")]
    pub items: Json,

    pub total: i64,

    #[sea_orm(column_type = "Text")]
    pub status: String,

    #[sea_orm(column_type = "Text")]
    pub paying_status: String,

    #[sea_orm(column_type = "Text")]
    pub refund_status: String,

    #[sea_orm(column_type = "Text")]
    pub payment_method: String,

    #[sea_orm(column_type = "Text", nullable, unique)]
    pub payment_reference: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub shipping_name: String,

    #[sea_orm(column_type = "Text")]
    pub shipping_phone: String,

    #[sea_orm(column_type = "Text")]
    pub shipping_address: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,

    /// Array of `HistoryEntry`, oldest first.
    #[sea_orm(column_type = "JsonBinary")]
    pub history: Json,

    #[sea_orm(column_type = "TimestampWithTimeZone")]
    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(column_type = "TimestampWithTimeZone")]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Entity",
        from = "Column::UserId",
        to = "crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Users,
}

impl Related<crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        #[cfg(feature = "no_db_triggers")]
        {
            use chrono::Utc;
            use sea_orm::Set;

            if !_insert {
                self.updated_at = Set(Utc::now().into());
            }
        }

        Ok(self)
    }
}

impl Model {
    pub fn history_entries(&self) -> Result<Vec<HistoryEntry>, String> {
        serde_json::from_value(self.history.clone()).map_err(|e| e.to_string())
    }
}

fn parse<T>(column: &str, value: &str, f: fn(&str) -> Option<T>) -> Result<T, String> {
    f(value).ok_or_else(|| format!("unknown {column} '{value}'"))
}

impl TryFrom<Model> for Order {
    type Error = String;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let items: Vec<OrderItem> =
            serde_json::from_value(model.items.clone()).map_err(|e| e.to_string())?;
        let history = model.history_entries()?;

        Ok(Order {
            id: model.id,
            user_id: model.user_id,
            contact_email: model.contact_email,
            items,
            total: model.total,
            status: parse("status", &model.status, OrderStatus::parse)?,
            paying_status: parse("paying_status", &model.paying_status, PayingStatus::parse)?,
            refund_status: parse("refund_status", &model.refund_status, RefundStatus::parse)?,
            payment_method: parse("payment_method", &model.payment_method, PaymentMethod::parse)?,
            payment_reference: model.payment_reference,
            shipping_name: model.shipping_name,
            shipping_phone: model.shipping_phone,
            shipping_address: model.shipping_address,
            note: model.note,
            history,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

#[cfg(test)]
pub(crate) fn model_from(order: &Order) -> Model {
    Model {
        id: order.id,
        user_id: order.user_id,
        contact_email: order.contact_email.clone(),
        items: serde_json::to_value(&order.items).unwrap(),
        total: order.total,
        status: order.status.as_str().to_string(),
        paying_status: order.paying_status.as_str().to_string(),
        refund_status: order.refund_status.as_str().to_string(),
        payment_method: order.payment_method.as_str().to_string(),
        payment_reference: order.payment_reference.clone(),
        shipping_name: order.shipping_name.clone(),
        shipping_phone: order.shipping_phone.clone(),
        shipping_address: order.shipping_address.clone(),
        note: order.note.clone(),
        history: serde_json::to_value(&order.history).unwrap(),
        created_at: order.created_at.fixed_offset(),
        updated_at: order.updated_at.fixed_offset(),
    }
}
