use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use super::row_mapping::subscription_from_model;
use super::sea_orm_entity::{
    subscription_frequencies as frequencies, subscription_plans as plans, subscriptions,
};
use crate::subscription::application::domain::entities::{
    NewSubscription, Subscription, SubscriptionScope, SubscriptionStatus,
};
use crate::subscription::application::ports::outgoing::{
    SubscriptionRepository, SubscriptionRepositoryError,
};

#[derive(Clone, Debug)]
pub struct SubscriptionRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

fn map_db_err(e: DbErr) -> SubscriptionRepositoryError {
    tracing::error!(error = %e, "Subscription storage error");
    SubscriptionRepositoryError::DatabaseError(e.to_string())
}

impl SubscriptionRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn insert_checked(
        txn: &DatabaseTransaction,
        data: NewSubscription,
    ) -> Result<subscriptions::Model, SubscriptionRepositoryError> {
        plans::Entity::find_by_id(data.subscription_plan_id)
            .filter(plans::Column::ShopId.eq(data.shop_id))
            .filter(plans::Column::IsDeleted.eq(false))
            .one(txn)
            .await
            .map_err(map_db_err)?
            .ok_or(SubscriptionRepositoryError::PlanNotFound)?;

        frequencies::Entity::find_by_id(data.frequency_id)
            .filter(frequencies::Column::SubscriptionPlanId.eq(data.subscription_plan_id))
            .one(txn)
            .await
            .map_err(map_db_err)?
            .ok_or(SubscriptionRepositoryError::FrequencyNotFound)?;

        subscriptions::ActiveModel {
            id: NotSet,
            shop_id: Set(data.shop_id),
            subscription_plan_id: Set(data.subscription_plan_id),
            frequency_id: Set(Some(data.frequency_id)),
            product_id: Set(data.product_id),
            customer_id: Set(data.customer_id),
            user_id: Set(Some(data.user_id)),
            status: Set(SubscriptionStatus::default().to_string()),
            is_deleted: Set(false),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(txn)
        .await
        .map_err(map_db_err)
    }
}

#[async_trait]
impl SubscriptionRepository for SubscriptionRepositoryPostgres {
    async fn create_subscription(
        &self,
        data: NewSubscription,
    ) -> Result<Subscription, SubscriptionRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let inserted = match Self::insert_checked(&txn, data).await {
            Ok(model) => model,
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(error = %rollback_err, "Subscription insert rollback failed");
                }
                return Err(e);
            }
        };

        txn.commit().await.map_err(map_db_err)?;

        subscription_from_model(inserted)
            .map_err(|e| SubscriptionRepositoryError::DatabaseError(e.to_string()))
    }

    async fn list_subscriptions(
        &self,
        scope: SubscriptionScope,
    ) -> Result<Vec<Subscription>, SubscriptionRepositoryError> {
        let mut query =
            subscriptions::Entity::find().filter(subscriptions::Column::IsDeleted.eq(false));
        query = match scope {
            SubscriptionScope::All => query,
            SubscriptionScope::Shop(shop_id) => {
                query.filter(subscriptions::Column::ShopId.eq(shop_id))
            }
            SubscriptionScope::User(user_id) => {
                query.filter(subscriptions::Column::UserId.eq(user_id))
            }
        };

        query
            .order_by_asc(subscriptions::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|row| {
                subscription_from_model(row)
                    .map_err(|e| SubscriptionRepositoryError::DatabaseError(e.to_string()))
            })
            .collect()
    }
}
