use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QuerySelect, TransactionTrait,
};

use super::row_mapping::{frequency_active_model, merge_selections, plan_from_model};
use super::sea_orm_entity::{
    subscription_frequencies as frequencies, subscription_plan_product_variants as variants,
    subscription_plan_products as plan_products, subscription_plans as plans,
};
use crate::catalog::adapter::outgoing::sea_orm_entity::shops;
use crate::subscription::application::domain::entities::{
    DeleteProducts, FrequencyFields, FrequencyUpdate, NewPlan, Plan, PlanUpdate,
};
use crate::subscription::application::ports::outgoing::{PlanRepository, PlanRepositoryError};

#[derive(Clone, Debug)]
pub struct PlanRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

fn map_db_err(e: DbErr) -> PlanRepositoryError {
    tracing::error!(error = %e, "Subscription plan storage error");
    PlanRepositoryError::DatabaseError(e.to_string())
}

async fn rollback(txn: DatabaseTransaction) {
    if let Err(e) = txn.rollback().await {
        tracing::warn!(error = %e, "Subscription plan rollback failed");
    }
}

impl PlanRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn insert_frequencies(
        txn: &DatabaseTransaction,
        plan_id: i32,
        fields: &[FrequencyFields],
    ) -> Result<(), PlanRepositoryError> {
        if fields.is_empty() {
            return Ok(());
        }
        let rows: Vec<frequencies::ActiveModel> = fields
            .iter()
            .map(|f| frequency_active_model(plan_id, f))
            .collect();

        frequencies::Entity::insert_many(rows)
            .exec_without_returning(txn)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    /// Reuses the `(plan, product)` association when present and inserts only missing variants.
    async fn upsert_products(
        txn: &DatabaseTransaction,
        plan_id: i32,
        merged: BTreeMap<i64, BTreeSet<i64>>,
    ) -> Result<(), PlanRepositoryError> {
        for (product_id, variant_ids) in merged {
            let existing = plan_products::Entity::find()
                .filter(plan_products::Column::SubscriptionPlanId.eq(plan_id))
                .filter(plan_products::Column::ProductId.eq(product_id))
                .one(txn)
                .await
                .map_err(map_db_err)?;

            let association_id = match existing {
                Some(row) => row.id,
                None => {
                    plan_products::ActiveModel {
                        id: NotSet,
                        subscription_plan_id: Set(plan_id),
                        product_id: Set(product_id),
                        created_at: NotSet,
                        updated_at: NotSet,
                    }
                    .insert(txn)
                    .await
                    .map_err(map_db_err)?
                    .id
                }
            };

            if variant_ids.is_empty() {
                continue;
            }

            let present: HashSet<i64> = variants::Entity::find()
                .filter(variants::Column::SubscriptionPlanProductId.eq(association_id))
                .select_only()
                .column(variants::Column::VariantId)
                .into_tuple::<i64>()
                .all(txn)
                .await
                .map_err(map_db_err)?
                .into_iter()
                .collect();

            let missing: Vec<variants::ActiveModel> = variant_ids
                .into_iter()
                .filter(|id| !present.contains(id))
                .map(|variant_id| variants::ActiveModel {
                    id: NotSet,
                    subscription_plan_product_id: Set(association_id),
                    variant_id: Set(variant_id),
                    created_at: NotSet,
                    updated_at: NotSet,
                })
                .collect();

            if !missing.is_empty() {
                variants::Entity::insert_many(missing)
                    .exec_without_returning(txn)
                    .await
                    .map_err(map_db_err)?;
            }
        }
        Ok(())
    }

    /// The tenant must exist and not be soft-deleted.
    async fn ensure_shop_active(
        txn: &DatabaseTransaction,
        shop_id: i32,
    ) -> Result<(), PlanRepositoryError> {
        shops::Entity::find_by_id(shop_id)
            .filter(shops::Column::IsDeleted.eq(false))
            .one(txn)
            .await
            .map_err(map_db_err)?
            .map(|_| ())
            .ok_or(PlanRepositoryError::ShopNotFound)
    }

    async fn insert_plan(
        txn: &DatabaseTransaction,
        data: NewPlan,
    ) -> Result<Plan, PlanRepositoryError> {
        Self::ensure_shop_active(txn, data.shop_id).await?;

        let inserted = plans::ActiveModel {
            id: NotSet,
            shop_id: Set(data.shop_id),
            name: Set(data.name),
            status: Set(data.status.to_string()),
            is_deleted: Set(false),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(txn)
        .await
        .map_err(map_db_err)?;

        Self::insert_frequencies(txn, inserted.id, &data.frequencies).await?;
        Self::upsert_products(txn, inserted.id, merge_selections(&data.products)).await?;

        plan_from_model(inserted).map_err(|e| PlanRepositoryError::DatabaseError(e.to_string()))
    }

    async fn ensure_frequencies_belong(
        txn: &DatabaseTransaction,
        plan_id: i32,
        ids: &[i32],
    ) -> Result<(), PlanRepositoryError> {
        if ids.is_empty() {
            return Ok(());
        }

        let owned: HashSet<i32> = frequencies::Entity::find()
            .filter(frequencies::Column::SubscriptionPlanId.eq(plan_id))
            .filter(frequencies::Column::Id.is_in(ids.to_vec()))
            .select_only()
            .column(frequencies::Column::Id)
            .into_tuple::<i32>()
            .all(txn)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .collect();

        match ids.iter().find(|id| !owned.contains(id)) {
            Some(&missing) => Err(PlanRepositoryError::FrequencyNotFound(missing)),
            None => Ok(()),
        }
    }

    async fn delete_products(
        txn: &DatabaseTransaction,
        plan_id: i32,
        delete: &DeleteProducts,
    ) -> Result<(), PlanRepositoryError> {
        if !delete.product_ids.is_empty() {
            let association_ids: Vec<i32> = plan_products::Entity::find()
                .filter(plan_products::Column::SubscriptionPlanId.eq(plan_id))
                .filter(plan_products::Column::ProductId.is_in(delete.product_ids.clone()))
                .select_only()
                .column(plan_products::Column::Id)
                .into_tuple::<i32>()
                .all(txn)
                .await
                .map_err(map_db_err)?;

            if !association_ids.is_empty() {
                variants::Entity::delete_many()
                    .filter(variants::Column::SubscriptionPlanProductId.is_in(association_ids.clone()))
                    .exec(txn)
                    .await
                    .map_err(map_db_err)?;
                plan_products::Entity::delete_many()
                    .filter(plan_products::Column::Id.is_in(association_ids))
                    .exec(txn)
                    .await
                    .map_err(map_db_err)?;
            }
        }

        if !delete.variant_ids.is_empty() {
            let plan_associations: Vec<i32> = plan_products::Entity::find()
                .filter(plan_products::Column::SubscriptionPlanId.eq(plan_id))
                .select_only()
                .column(plan_products::Column::Id)
                .into_tuple::<i32>()
                .all(txn)
                .await
                .map_err(map_db_err)?;

            if plan_associations.is_empty() {
                return Ok(());
            }

            variants::Entity::delete_many()
                .filter(variants::Column::SubscriptionPlanProductId.is_in(plan_associations.clone()))
                .filter(variants::Column::VariantId.is_in(delete.variant_ids.clone()))
                .exec(txn)
                .await
                .map_err(map_db_err)?;

            let populated: Vec<i32> = variants::Entity::find()
                .filter(variants::Column::SubscriptionPlanProductId.is_in(plan_associations))
                .select_only()
                .column(variants::Column::SubscriptionPlanProductId)
                .distinct()
                .into_tuple::<i32>()
                .all(txn)
                .await
                .map_err(map_db_err)?;

            // Drops every variant-less association of the plan.
            let mut orphans = plan_products::Entity::delete_many()
                .filter(plan_products::Column::SubscriptionPlanId.eq(plan_id));
            if !populated.is_empty() {
                orphans = orphans.filter(plan_products::Column::Id.is_not_in(populated));
            }
            orphans.exec(txn).await.map_err(map_db_err)?;
        }

        Ok(())
    }

    async fn overwrite_frequencies(
        txn: &DatabaseTransaction,
        plan_id: i32,
        updates: &[FrequencyUpdate],
    ) -> Result<(), PlanRepositoryError> {
        for update in updates {
            let mut row = frequency_active_model(plan_id, &update.fields);
            row.updated_at = Set(Utc::now().into());

            frequencies::Entity::update_many()
                .set(row)
                .filter(frequencies::Column::Id.eq(update.id))
                .filter(frequencies::Column::SubscriptionPlanId.eq(plan_id))
                .exec(txn)
                .await
                .map_err(map_db_err)?;
        }
        Ok(())
    }

    async fn apply_update(
        txn: &DatabaseTransaction,
        shop_id: i32,
        plan_id: i32,
        update: PlanUpdate,
    ) -> Result<Plan, PlanRepositoryError> {
        let current = plans::Entity::find_by_id(plan_id)
            .filter(plans::Column::ShopId.eq(shop_id))
            .one(txn)
            .await
            .map_err(map_db_err)?
            .ok_or(PlanRepositoryError::PlanNotFound)?;

        Self::ensure_frequencies_belong(txn, plan_id, &update.referenced_frequency_ids()).await?;

        Self::delete_products(txn, plan_id, &update.delete_products).await?;
        Self::upsert_products(txn, plan_id, merge_selections(&update.add_products)).await?;

        if !update.removed_frequency.is_empty() {
            frequencies::Entity::delete_many()
                .filter(frequencies::Column::SubscriptionPlanId.eq(plan_id))
                .filter(frequencies::Column::Id.is_in(update.removed_frequency.clone()))
                .exec(txn)
                .await
                .map_err(map_db_err)?;
        }

        Self::insert_frequencies(txn, plan_id, &update.add_frequency).await?;
        Self::overwrite_frequencies(txn, plan_id, &update.update_frequency).await?;

        let now = Utc::now();
        let mut patch = plans::Entity::update_many()
            .col_expr(plans::Column::UpdatedAt, Expr::value(now))
            .filter(plans::Column::Id.eq(plan_id));
        if let Some(name) = &update.name {
            patch = patch.col_expr(plans::Column::Name, Expr::value(name.clone()));
        }
        if let Some(status) = update.status {
            patch = patch.col_expr(plans::Column::Status, Expr::value(status.to_string()));
        }
        if let Some(is_deleted) = update.is_deleted {
            patch = patch.col_expr(plans::Column::IsDeleted, Expr::value(is_deleted));
        }
        patch.exec(txn).await.map_err(map_db_err)?;

        let mut plan = plan_from_model(current)
            .map_err(|e| PlanRepositoryError::DatabaseError(e.to_string()))?;
        if let Some(name) = update.name {
            plan.name = name;
        }
        if let Some(status) = update.status {
            plan.status = status;
        }
        if let Some(is_deleted) = update.is_deleted {
            plan.is_deleted = is_deleted;
        }
        plan.updated_at = now;
        Ok(plan)
    }
}

#[async_trait]
impl PlanRepository for PlanRepositoryPostgres {
    async fn create_plan(&self, data: NewPlan) -> Result<Plan, PlanRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        match Self::insert_plan(&txn, data).await {
            Ok(plan) => {
                txn.commit().await.map_err(map_db_err)?;
                Ok(plan)
            }
            Err(e) => {
                rollback(txn).await;
                Err(e)
            }
        }
    }

    /// Validates ownership first, then applies every mutation inside one transaction.
    async fn update_plan(
        &self,
        shop_id: i32,
        plan_id: i32,
        update: PlanUpdate,
    ) -> Result<Plan, PlanRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        match Self::apply_update(&txn, shop_id, plan_id, update).await {
            Ok(plan) => {
                txn.commit().await.map_err(map_db_err)?;
                Ok(plan)
            }
            Err(e) => {
                rollback(txn).await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::application::domain::ProductSelection;
    use crate::subscription::application::domain::entities::PlanStatus;
    use sea_orm::sea_query::Value;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::collections::BTreeMap as Row;

    fn plan_row(id: i32, shop_id: i32) -> plans::Model {
        let now = Utc::now();
        plans::Model {
            id,
            shop_id,
            name: "Coffee Club".to_string(),
            status: "ACTIVE".to_string(),
            is_deleted: false,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn association_row(id: i32, plan_id: i32, product_id: i64) -> plan_products::Model {
        let now = Utc::now();
        plan_products::Model {
            id,
            subscription_plan_id: plan_id,
            product_id,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn shop_row(id: i32) -> shops::Model {
        let now = Utc::now();
        shops::Model {
            id,
            shop_url: "coffee.myshopify.com".to_string(),
            email: None,
            access_token: Some("shpat_test".to_string()),
            is_deleted: false,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    /// Every statement the mock saw, with parameters inlined.
    fn executed_sql(db: Arc<DatabaseConnection>) -> Vec<String> {
        let Ok(db) = Arc::try_unwrap(db) else {
            panic!("repository still holds the connection");
        };
        db.into_transaction_log()
            .iter()
            .flat_map(|txn| txn.statements().iter().map(|stmt| stmt.to_string()))
            .collect()
    }

    fn int_row(column: &str, value: i32) -> Row<String, Value> {
        Row::from([(column.to_string(), Value::Int(Some(value)))])
    }

    fn big_row(column: &str, value: i64) -> Row<String, Value> {
        Row::from([(column.to_string(), Value::BigInt(Some(value)))])
    }

    fn exec(rows: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: rows,
        }
    }

    #[tokio::test]
    async fn test_create_plan_inserts_nested_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![shop_row(1)]])
            .append_query_results(vec![vec![plan_row(5, 1)]])
            .append_query_results(vec![Vec::<plan_products::Model>::new()])
            .append_query_results(vec![vec![association_row(11, 5, 10)]])
            .append_query_results(vec![Vec::<Row<String, Value>>::new()])
            .append_exec_results(vec![exec(1), exec(2)])
            .into_connection();

        let plan = PlanRepositoryPostgres::new(Arc::new(db))
            .create_plan(NewPlan {
                shop_id: 1,
                name: "Coffee Club".to_string(),
                status: PlanStatus::Active,
                frequencies: vec![FrequencyFields::default()],
                products: vec![ProductSelection {
                    product_id: 10,
                    variant_ids: vec![100, 101, 100],
                }],
            })
            .await
            .unwrap();

        assert_eq!(plan.id, 5);
        assert_eq!(plan.status, PlanStatus::Active);
    }

    fn empty_plan(shop_id: i32) -> NewPlan {
        NewPlan {
            shop_id,
            name: "Plan".to_string(),
            status: PlanStatus::Active,
            frequencies: vec![],
            products: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_plan_for_missing_shop_writes_nothing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![Vec::<shops::Model>::new()])
                .into_connection(),
        );

        let err = PlanRepositoryPostgres::new(Arc::clone(&db))
            .create_plan(empty_plan(404))
            .await
            .unwrap_err();

        assert_eq!(err, PlanRepositoryError::ShopNotFound);
        let sql = executed_sql(db);
        assert!(sql.iter().all(|stmt| !stmt.starts_with("INSERT")));
        assert!(sql.iter().any(|stmt| stmt == "ROLLBACK"));
    }

    #[tokio::test]
    async fn test_create_plan_lookup_excludes_soft_deleted_shops() {
        // A soft-deleted shop does not match the lookup, so the mock returns no row.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![Vec::<shops::Model>::new()])
                .into_connection(),
        );

        let err = PlanRepositoryPostgres::new(Arc::clone(&db))
            .create_plan(empty_plan(7))
            .await
            .unwrap_err();

        assert_eq!(err, PlanRepositoryError::ShopNotFound);
        let sql = executed_sql(db);
        let lookup = sql
            .iter()
            .find(|stmt| stmt.contains(r#"FROM "shops""#))
            .expect("shop lookup");
        assert!(lookup.contains(r#""shops"."id" = 7"#));
        assert!(lookup.contains(r#""shops"."is_deleted" = FALSE"#));
    }

    #[tokio::test]
    async fn test_create_plan_storage_failure_is_reported() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let err = PlanRepositoryPostgres::new(Arc::new(db))
            .create_plan(empty_plan(1))
            .await
            .unwrap_err();

        assert!(matches!(err, PlanRepositoryError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_update_unknown_plan() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<plans::Model>::new()])
            .into_connection();

        let err = PlanRepositoryPostgres::new(Arc::new(db))
            .update_plan(2, 5, PlanUpdate::default())
            .await
            .unwrap_err();

        assert_eq!(err, PlanRepositoryError::PlanNotFound);
    }

    #[tokio::test]
    async fn test_update_with_foreign_frequency_writes_nothing() {
        // No exec results are queued: any write would surface as a database error.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![plan_row(5, 1)]])
            .append_query_results(vec![vec![int_row("id", 3)]])
            .into_connection();

        let err = PlanRepositoryPostgres::new(Arc::new(db))
            .update_plan(
                1,
                5,
                PlanUpdate {
                    removed_frequency: vec![3, 42],
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err, PlanRepositoryError::FrequencyNotFound(42));
    }

    #[tokio::test]
    async fn test_re_adding_existing_variant_inserts_nothing() {
        // The single queued exec result is consumed by the plan touch.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![plan_row(5, 1)]])
            .append_query_results(vec![vec![association_row(11, 5, 10)]])
            .append_query_results(vec![vec![big_row("variant_id", 100)]])
            .append_exec_results(vec![exec(1)])
            .into_connection();

        let plan = PlanRepositoryPostgres::new(Arc::new(db))
            .update_plan(
                1,
                5,
                PlanUpdate {
                    add_products: vec![ProductSelection {
                        product_id: 10,
                        variant_ids: vec![100],
                    }],
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(plan.id, 5);
    }

    #[tokio::test]
    async fn test_simple_fields_are_applied_to_result() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![plan_row(5, 1)]])
            .append_exec_results(vec![exec(1)])
            .into_connection();

        let plan = PlanRepositoryPostgres::new(Arc::new(db))
            .update_plan(
                1,
                5,
                PlanUpdate {
                    name: Some("Tea Club".to_string()),
                    status: Some(PlanStatus::Inactive),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(plan.name, "Tea Club");
        assert_eq!(plan.status, PlanStatus::Inactive);
    }

    #[tokio::test]
    async fn test_variant_delete_drops_emptied_association() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![plan_row(5, 1)]])
            .append_query_results(vec![vec![int_row("id", 11)]])
            .append_query_results(vec![Vec::<Row<String, Value>>::new()])
            .append_exec_results(vec![exec(1), exec(1), exec(1)])
            .into_connection();

        let result = PlanRepositoryPostgres::new(Arc::new(db))
            .update_plan(
                1,
                5,
                PlanUpdate {
                    delete_products: DeleteProducts {
                        product_ids: vec![],
                        variant_ids: vec![100],
                    },
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_variant_delete_drops_every_variantless_association() {
        // 11 keeps variant 101 and 13 keeps 300; 12 had no variants before this call.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![plan_row(5, 1)]])
                .append_query_results(vec![vec![
                    int_row("id", 11),
                    int_row("id", 12),
                    int_row("id", 13),
                ]])
                .append_query_results(vec![vec![
                    int_row("subscription_plan_product_id", 11),
                    int_row("subscription_plan_product_id", 13),
                ]])
                .append_exec_results(vec![exec(1), exec(1), exec(1)])
                .into_connection(),
        );

        PlanRepositoryPostgres::new(Arc::clone(&db))
            .update_plan(
                1,
                5,
                PlanUpdate {
                    delete_products: DeleteProducts {
                        product_ids: vec![],
                        variant_ids: vec![100],
                    },
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let sql = executed_sql(db);
        let association_delete = sql
            .iter()
            .find(|stmt| stmt.starts_with(r#"DELETE FROM "subscription_plan_products""#))
            .expect("association delete");
        assert!(association_delete
            .contains(r#""subscription_plan_products"."subscription_plan_id" = 5"#));
        assert!(association_delete
            .contains(r#""subscription_plan_products"."id" NOT IN (11, 13)"#));
        assert!(sql.iter().any(|stmt| stmt == "COMMIT"));
    }
}
