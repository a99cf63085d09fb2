use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::str::FromStr;
use std::sync::Arc;

use super::sea_orm_entity::verification_codes::{
    ActiveModel as CodeActiveModel, Column as CodeColumn, Entity as CodeEntity, Model as CodeModel,
};
use crate::auth::application::domain::entities::{CodePurpose, UserId, VerificationCode};
use crate::auth::application::ports::outgoing::verification_code_repository::{
    NewVerificationCode, VerificationCodeRepository, VerificationCodeRepositoryError,
};

#[derive(Clone, Debug)]
pub struct VerificationCodeRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl VerificationCodeRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_domain(model: CodeModel) -> Result<VerificationCode, VerificationCodeRepositoryError> {
        let purpose = CodePurpose::from_str(&model.purpose).map_err(|_| {
            VerificationCodeRepositoryError::DatabaseError(format!(
                "unknown code purpose '{}' on row {}",
                model.purpose, model.id
            ))
        })?;

        Ok(VerificationCode {
            id: model.id,
            user_id: UserId::from(model.user_id),
            code: model.code,
            purpose,
            expires_at: model.expires_at.with_timezone(&chrono::Utc),
            is_used: model.is_used,
        })
    }
}

fn db_err(e: sea_orm::DbErr) -> VerificationCodeRepositoryError {
    VerificationCodeRepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl VerificationCodeRepository for VerificationCodeRepositoryPostgres {
    async fn delete_unused(
        &self,
        user_id: UserId,
        purpose: CodePurpose,
    ) -> Result<u64, VerificationCodeRepositoryError> {
        let result = CodeEntity::delete_many()
            .filter(CodeColumn::UserId.eq(user_id.value()))
            .filter(CodeColumn::Purpose.eq(purpose.as_ref()))
            .filter(CodeColumn::IsUsed.eq(false))
            .exec(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected)
    }

    async fn insert(
        &self,
        code: NewVerificationCode,
    ) -> Result<VerificationCode, VerificationCodeRepositoryError> {
        let model = CodeActiveModel {
            id: NotSet,
            user_id: Set(code.user_id.value()),
            code: Set(code.code),
            purpose: Set(code.purpose.to_string()),
            expires_at: Set(code.expires_at.into()),
            is_used: Set(false),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(&*self.db)
        .await
        .map_err(db_err)?;

        Self::to_domain(model)
    }

    async fn find_unused(
        &self,
        user_id: UserId,
        purpose: CodePurpose,
        code: &str,
    ) -> Result<Option<VerificationCode>, VerificationCodeRepositoryError> {
        let model = CodeEntity::find()
            .filter(CodeColumn::UserId.eq(user_id.value()))
            .filter(CodeColumn::Purpose.eq(purpose.as_ref()))
            .filter(CodeColumn::Code.eq(code))
            .filter(CodeColumn::IsUsed.eq(false))
            .order_by_desc(CodeColumn::Id)
            .one(&*self.db)
            .await
            .map_err(db_err)?;

        model.map(Self::to_domain).transpose()
    }

    async fn mark_used(&self, code_id: i32) -> Result<(), VerificationCodeRepositoryError> {
        CodeEntity::update_many()
            .col_expr(CodeColumn::IsUsed, Expr::value(true))
            .col_expr(CodeColumn::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(CodeColumn::Id.eq(code_id))
            .exec(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}
