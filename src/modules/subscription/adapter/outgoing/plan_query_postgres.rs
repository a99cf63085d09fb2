use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::row_mapping::{frequency_from_model, plan_from_model, CorruptRow};
use super::sea_orm_entity::{
    subscription_frequencies as frequencies, subscription_plan_product_variants as variants,
    subscription_plan_products as plan_products, subscription_plans as plans,
};
use crate::subscription::application::domain::entities::{Frequency, PlanProduct, PlanView};
use crate::subscription::application::ports::outgoing::{PlanFilter, PlanQuery, PlanQueryError};

#[derive(Clone, Debug)]
pub struct PlanQueryPostgres {
    db: Arc<DatabaseConnection>,
}

fn map_db_err(e: DbErr) -> PlanQueryError {
    tracing::error!(error = %e, "Subscription plan query failed");
    PlanQueryError::DatabaseError(e.to_string())
}

fn map_corrupt(e: CorruptRow) -> PlanQueryError {
    tracing::error!(column = e.column, value = %e.value, "Unreadable subscription plan row");
    PlanQueryError::DatabaseError(e.to_string())
}

impl PlanQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn frequency_counts(&self, plan_ids: &[i32]) -> Result<HashMap<i32, i64>, PlanQueryError> {
        let rows = frequencies::Entity::find()
            .select_only()
            .column_as(frequencies::Column::SubscriptionPlanId, "plan_id")
            .column_as(Expr::col(frequencies::Column::Id).count(), "total")
            .filter(frequencies::Column::SubscriptionPlanId.is_in(plan_ids.to_vec()))
            .group_by(frequencies::Column::SubscriptionPlanId)
            .into_tuple::<(i32, i64)>()
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().collect())
    }

    async fn product_counts(&self, plan_ids: &[i32]) -> Result<HashMap<i32, i64>, PlanQueryError> {
        let rows = plan_products::Entity::find()
            .select_only()
            .column_as(plan_products::Column::SubscriptionPlanId, "plan_id")
            .column_as(Expr::col(plan_products::Column::Id).count(), "total")
            .filter(plan_products::Column::SubscriptionPlanId.is_in(plan_ids.to_vec()))
            .group_by(plan_products::Column::SubscriptionPlanId)
            .into_tuple::<(i32, i64)>()
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().collect())
    }

    async fn frequencies_by_plan(
        &self,
        plan_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<Frequency>>, PlanQueryError> {
        let rows = frequencies::Entity::find()
            .filter(frequencies::Column::SubscriptionPlanId.is_in(plan_ids.to_vec()))
            .order_by_asc(frequencies::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let mut grouped: HashMap<i32, Vec<Frequency>> = HashMap::new();
        for row in rows {
            let frequency = frequency_from_model(row).map_err(map_corrupt)?;
            grouped
                .entry(frequency.subscription_plan_id)
                .or_default()
                .push(frequency);
        }
        Ok(grouped)
    }

    async fn products_by_plan(
        &self,
        plan_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<PlanProduct>>, PlanQueryError> {
        let associations = plan_products::Entity::find()
            .filter(plan_products::Column::SubscriptionPlanId.is_in(plan_ids.to_vec()))
            .order_by_asc(plan_products::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        if associations.is_empty() {
            return Ok(HashMap::new());
        }

        let association_ids: Vec<i32> = associations.iter().map(|a| a.id).collect();
        let mut variant_ids: HashMap<i32, Vec<i64>> = HashMap::new();
        for row in variants::Entity::find()
            .filter(variants::Column::SubscriptionPlanProductId.is_in(association_ids))
            .order_by_asc(variants::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
        {
            variant_ids
                .entry(row.subscription_plan_product_id)
                .or_default()
                .push(row.variant_id);
        }

        let mut grouped: HashMap<i32, Vec<PlanProduct>> = HashMap::new();
        for association in associations {
            grouped
                .entry(association.subscription_plan_id)
                .or_default()
                .push(PlanProduct {
                    id: association.id,
                    product_id: association.product_id,
                    variant_ids: variant_ids.remove(&association.id).unwrap_or_default(),
                });
        }
        Ok(grouped)
    }
}

#[async_trait]
impl PlanQuery for PlanQueryPostgres {
    async fn list_plans(
        &self,
        shop_id: i32,
        filter: PlanFilter,
    ) -> Result<Vec<PlanView>, PlanQueryError> {
        let mut query = plans::Entity::find()
            .filter(plans::Column::ShopId.eq(shop_id))
            .filter(plans::Column::IsDeleted.eq(false));
        if let Some(id) = filter.id {
            query = query.filter(plans::Column::Id.eq(id));
        }

        let rows = query
            .order_by_asc(plans::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let plan_ids: Vec<i32> = rows.iter().map(|p| p.id).collect();
        let frequency_counts = self.frequency_counts(&plan_ids).await?;
        let product_counts = self.product_counts(&plan_ids).await?;

        let mut nested_frequencies = if filter.include_frequencies {
            Some(self.frequencies_by_plan(&plan_ids).await?)
        } else {
            None
        };
        let mut nested_products = if filter.include_products {
            Some(self.products_by_plan(&plan_ids).await?)
        } else {
            None
        };

        rows.into_iter()
            .map(|row| {
                let id = row.id;
                Ok(PlanView {
                    plan: plan_from_model(row).map_err(map_corrupt)?,
                    product_count: product_counts.get(&id).copied().unwrap_or(0),
                    frequency_count: frequency_counts.get(&id).copied().unwrap_or(0),
                    frequencies: nested_frequencies
                        .as_mut()
                        .map(|by_plan| by_plan.remove(&id).unwrap_or_default()),
                    products: nested_products
                        .as_mut()
                        .map(|by_plan| by_plan.remove(&id).unwrap_or_default()),
                })
            })
            .collect()
    }
}
