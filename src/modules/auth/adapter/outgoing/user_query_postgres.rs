use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use std::sync::Arc;

use super::sea_orm_entity::users::{
    Column as UserColumn, Entity as UserEntity, Model as UserModel,
};
use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::user_query::{
    UserQuery, UserQueryError, UserQueryResult,
};

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_query_result(model: UserModel) -> UserQueryResult {
        UserQueryResult {
            id: UserId::from(model.id),
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            is_verified: model.is_verified,
            referral_code: model.referral_code,
            is_superuser: model.is_superuser,
            is_deleted: model.is_deleted,
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        }
    }
}

fn db_err(e: sea_orm::DbErr) -> UserQueryError {
    UserQueryError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserQueryResult>, UserQueryError> {
        let user = UserEntity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(user.map(Self::map_to_query_result))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserQueryResult>, UserQueryError> {
        let user = UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(user.map(Self::map_to_query_result))
    }

    async fn find_by_referral_code(
        &self,
        referral_code: &str,
    ) -> Result<Option<UserQueryResult>, UserQueryError> {
        let user = UserEntity::find()
            .filter(UserColumn::ReferralCode.eq(referral_code))
            .one(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(user.map(Self::map_to_query_result))
    }

    async fn referral_code_exists(&self, referral_code: &str) -> Result<bool, UserQueryError> {
        let count = UserEntity::find()
            .filter(UserColumn::ReferralCode.eq(referral_code))
            .count(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(count > 0)
    }
}
