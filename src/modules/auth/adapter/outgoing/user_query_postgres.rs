use super::sea_orm_entity::users::{Column as UserColumn, Entity as UserEntity};
use crate::auth::application::domain::entities::{User, UserId};
use crate::auth::application::ports::outgoing::user_query::{
    UserListFilter, UserQuery, UserQueryError,
};
use crate::shared::db::contains_pattern;
use crate::shared::pagination::{PageRequest, PageResult};
use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> UserQueryError {
    UserQueryError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(user.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find()
            .filter(UserColumn::Email.eq(email.trim().to_lowercase()))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(user.map(User::from))
    }

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find()
            .filter(UserColumn::ResetTokenHash.eq(token_hash))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(user.map(User::from))
    }

    async fn list_users(
        &self,
        filter: UserListFilter,
        page: PageRequest,
    ) -> Result<PageResult<User>, UserQueryError> {
        let mut query = UserEntity::find();

        if let Some(search) = filter.search {
            let pattern = contains_pattern(&search);
            query = query.filter(
                Condition::any()
                    .add(Expr::col(UserColumn::Name).ilike(pattern.clone()))
                    .add(Expr::col(UserColumn::Email).ilike(pattern)),
            );
        }

        let total = query.clone().count(&*self.db).await.map_err(map_db_err)?;

        let users = query
            .order_by_desc(UserColumn::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(PageResult::new(
            users.into_iter().map(User::from).collect(),
            page,
            total,
        ))
    }
}
