use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use std::sync::Arc;

use crate::auth::application::domain::entities::{User, UserId};
use crate::auth::application::ports::outgoing::user_repository::{
    ProfileChanges, UserRepository, UserRepositoryError,
};
use crate::shared::db::is_unique_violation;

use super::sea_orm_entity::users::{ActiveModel as UserActiveModel, Entity as UserEntity};

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn load(&self, user_id: UserId) -> Result<UserActiveModel, UserRepositoryError> {
        let user = UserEntity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(UserRepositoryError::UserNotFound)?;

        Ok(user.into())
    }
}

fn map_db_err(e: DbErr) -> UserRepositoryError {
    UserRepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: User) -> Result<User, UserRepositoryError> {
        let active_user = UserActiveModel {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            phone: Set(user.phone),
            address: Set(user.address),
            role: Set(user.role.as_str().to_string()),
            is_verified: Set(user.is_verified),
            is_deleted: Set(user.is_deleted),
            reset_token_hash: Set(None),
            reset_token_expires_at: Set(None),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active_user.insert(&*self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                return UserRepositoryError::UserAlreadyExists;
            }
            map_db_err(e)
        })?;

        Ok(User::from(inserted))
    }

    async fn activate_user(&self, user_id: UserId) -> Result<(), UserRepositoryError> {
        let mut active_user = self.load(user_id).await?;
        active_user.is_verified = Set(true);
        active_user.update(&*self.db).await.map_err(map_db_err)?;
        Ok(())
    }

    async fn update_password(
        &self,
        user_id: UserId,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        let mut active_user = self.load(user_id).await?;
        active_user.password_hash = Set(new_password_hash);
        active_user.reset_token_hash = Set(None);
        active_user.reset_token_expires_at = Set(None);
        active_user.update(&*self.db).await.map_err(map_db_err)?;
        Ok(())
    }

    async fn set_reset_token(
        &self,
        user_id: UserId,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        let mut active_user = self.load(user_id).await?;
        active_user.reset_token_hash = Set(Some(token_hash));
        active_user.reset_token_expires_at = Set(Some(expires_at.fixed_offset()));
        active_user.update(&*self.db).await.map_err(map_db_err)?;
        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<User, UserRepositoryError> {
        let mut active_user = self.load(user_id).await?;

        if let Some(name) = changes.name {
            active_user.name = Set(name);
        }
        if let Some(phone) = changes.phone {
            active_user.phone = Set(Some(phone));
        }
        if let Some(address) = changes.address {
            active_user.address = Set(Some(address));
        }

        let updated = active_user.update(&*self.db).await.map_err(map_db_err)?;
        Ok(User::from(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::adapter::outgoing::sea_orm_entity::users::{sample_model, Model};
    use crate::auth::application::domain::entities::UserRole;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    fn new_user(id: Uuid) -> User {
        User::from(sample_model(id, "lan@example.com"))
    }

    #[tokio::test]
    async fn create_user_returns_inserted_row() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![sample_model(id, "lan@example.com")]])
            .into_connection();

        let user = UserRepositoryPostgres::new(Arc::new(db))
            .create_user(new_user(id))
            .await
            .unwrap();

        assert_eq!(user.id, id);
        assert_eq!(user.role, UserRole::Customer);
    }

    #[tokio::test]
    async fn duplicate_email_is_reported() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom(
                "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
            )])
            .into_connection();

        let result = UserRepositoryPostgres::new(Arc::new(db))
            .create_user(new_user(Uuid::new_v4()))
            .await;

        assert!(matches!(result, Err(UserRepositoryError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn activate_missing_user_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let result = UserRepositoryPostgres::new(Arc::new(db))
            .activate_user(UserId::from(Uuid::new_v4()))
            .await;

        assert!(matches!(result, Err(UserRepositoryError::UserNotFound)));
    }

    #[tokio::test]
    async fn update_profile_returns_updated_user() {
        let id = Uuid::new_v4();
        let before = sample_model(id, "lan@example.com");
        let mut after = before.clone();
        after.name = "Tran Thi B".to_string();
        after.phone = Some("0901234567".to_string());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![before]])
            .append_query_results(vec![vec![after]])
            .into_connection();

        let user = UserRepositoryPostgres::new(Arc::new(db))
            .update_profile(
                UserId::from(id),
                ProfileChanges {
                    name: Some("Tran Thi B".to_string()),
                    phone: Some("0901234567".to_string()),
                    address: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(user.name, "Tran Thi B");
        assert_eq!(user.phone.as_deref(), Some("0901234567"));
    }

    #[tokio::test]
    async fn update_password_propagates_db_error() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![sample_model(id, "lan@example.com")]])
            .append_query_errors(vec![DbErr::Custom("write failed".to_string())])
            .into_connection();

        let result = UserRepositoryPostgres::new(Arc::new(db))
            .update_password(UserId::from(id), "new-hash".to_string())
            .await;

        assert!(matches!(result, Err(UserRepositoryError::DatabaseError(_))));
    }
}
