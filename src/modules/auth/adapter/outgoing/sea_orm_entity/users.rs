use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};

use crate::auth::application::domain::entities::{User, UserRole};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub is_verified: bool,
    pub is_deleted: bool,
    pub reset_token_hash: Option<String>,
    pub reset_token_expires_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
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
        if let ActiveValue::Set(email) = &self.email {
            self.email = Set(email.trim().to_lowercase());
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

impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            phone: model.phone,
            address: model.address,
            // Unknown role strings are treated as the least privileged role.
            role: UserRole::parse(&model.role).unwrap_or_default(),
            is_verified: model.is_verified,
            is_deleted: model.is_deleted,
            reset_token_hash: model.reset_token_hash,
            reset_token_expires_at: model
                .reset_token_expires_at
                .map(|t| t.with_timezone(&chrono::Utc)),
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_model(id: Uuid, email: &str) -> Model {
    let now = chrono::Utc::now().fixed_offset();
    Model {
        id,
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: "hashed_password".to_string(),
        phone: None,
        address: None,
        role: "customer".to_string(),
        is_verified: true,
        is_deleted: false,
        reset_token_hash: None,
        reset_token_expires_at: None,
        created_at: now,
        updated_at: now,
    }
}
