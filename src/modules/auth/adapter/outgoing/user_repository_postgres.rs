use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, SqlErr, TransactionTrait,
};
use std::sync::Arc;

use super::sea_orm_entity::referrals::ActiveModel as ReferralActiveModel;
use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity, Model as UserModel,
};
use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::user_repository::{
    CreateUserData, UserRepository, UserRepositoryError, UserResult,
};

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_user_result(model: UserModel) -> UserResult {
        UserResult {
            id: UserId::from(model.id),
            name: model.name,
            email: model.email,
            is_verified: model.is_verified,
            referral_code: model.referral_code,
        }
    }

    async fn update_flag(
        &self,
        user_id: UserId,
        column: UserColumn,
        value: sea_orm::Value,
    ) -> Result<(), UserRepositoryError> {
        let result = UserEntity::update_many()
            .col_expr(column, Expr::value(value))
            .col_expr(UserColumn::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(UserColumn::Id.eq(user_id.value()))
            .exec(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(UserRepositoryError::UserNotFound);
        }
        Ok(())
    }
}

/// Postgres names the column constraint `users_referral_code_key`.
const REFERRAL_CODE_CONSTRAINT: &str = "referral_code";

fn map_insert_error(e: DbErr) -> UserRepositoryError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => unique_violation(&detail),
        _ => UserRepositoryError::DatabaseError(e.to_string()),
    }
}

fn unique_violation(detail: &str) -> UserRepositoryError {
    if detail.contains(REFERRAL_CODE_CONSTRAINT) {
        UserRepositoryError::ReferralCodeTaken
    } else {
        UserRepositoryError::UserAlreadyExists
    }
}

async fn rollback(txn: DatabaseTransaction) {
    if let Err(e) = txn.rollback().await {
        tracing::warn!(error = %e, "User insert rollback failed");
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    /// Inserts the user and, when referred, the referral edge in one transaction.
    async fn create_user(&self, data: CreateUserData) -> Result<UserResult, UserRepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        let active_user = UserActiveModel {
            id: NotSet,
            name: Set(data.name),
            email: Set(data.email),
            password_hash: Set(data.password_hash),
            is_verified: Set(false),
            referral_code: Set(Some(data.referral_code)),
            is_superuser: Set(false),
            is_deleted: Set(false),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = match active_user.insert(&txn).await {
            Ok(model) => model,
            Err(e) => {
                rollback(txn).await;
                return Err(map_insert_error(e));
            }
        };

        if let Some(referrer) = data.referred_by {
            let referral = ReferralActiveModel {
                id: NotSet,
                referred_id: Set(inserted.id),
                referred_by_id: Set(referrer.value()),
                created_at: NotSet,
            };

            if let Err(e) = referral.insert(&txn).await {
                tracing::error!(user_id = inserted.id, error = %e, "Failed to record referral");
                rollback(txn).await;
                return Err(UserRepositoryError::DatabaseError(e.to_string()));
            }
        }

        txn.commit()
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        Ok(Self::map_to_user_result(inserted))
    }

    async fn mark_verified(&self, user_id: UserId) -> Result<(), UserRepositoryError> {
        self.update_flag(user_id, UserColumn::IsVerified, true.into())
            .await
    }

    async fn update_password(
        &self,
        user_id: UserId,
        password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        self.update_flag(user_id, UserColumn::PasswordHash, password_hash.into())
            .await
    }
}
