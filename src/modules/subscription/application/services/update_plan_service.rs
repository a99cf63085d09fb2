use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use super::{check_catalog, CatalogCheckError};
use crate::catalog::application::ports::outgoing::CatalogSource;
use crate::subscription::application::domain::entities::{Plan, PlanUpdate};
use crate::subscription::application::domain::policies::{validate_plan_name, PlanInputError};
use crate::subscription::application::ports::incoming::use_cases::{
    UpdatePlanError, UpdatePlanUseCase,
};
use crate::subscription::application::ports::outgoing::{PlanRepository, PlanRepositoryError};

impl From<CatalogCheckError> for UpdatePlanError {
    fn from(e: CatalogCheckError) -> Self {
        match e {
            CatalogCheckError::Invalid(e) => Self::InvalidReference(e),
            CatalogCheckError::ShopNotFound => Self::ShopNotFound,
            CatalogCheckError::Unavailable(msg) => Self::CatalogUnavailable(msg),
        }
    }
}

pub struct UpdatePlanService {
    catalog: Arc<dyn CatalogSource>,
    plans: Arc<dyn PlanRepository>,
}

impl UpdatePlanService {
    pub fn new(catalog: Arc<dyn CatalogSource>, plans: Arc<dyn PlanRepository>) -> Self {
        Self { catalog, plans }
    }

    fn validate_input(update: &mut PlanUpdate) -> Result<(), UpdatePlanError> {
        fn invalid(e: PlanInputError) -> UpdatePlanError {
            UpdatePlanError::Validation(e.to_string())
        }

        if let Some(name) = update.name.take() {
            update.name = Some(validate_plan_name(&name).map_err(invalid)?);
        }
        for frequency in &update.add_frequency {
            frequency.validate().map_err(invalid)?;
        }
        for frequency in &update.update_frequency {
            frequency.fields.validate().map_err(invalid)?;
        }
        Ok(())
    }
}

#[async_trait]
impl UpdatePlanUseCase for UpdatePlanService {
    async fn execute(
        &self,
        shop_id: i32,
        plan_id: i32,
        mut update: PlanUpdate,
    ) -> Result<Plan, UpdatePlanError> {
        Self::validate_input(&mut update)?;

        if update.references_catalog() {
            let (product_ids, variant_ids) = update.catalog_ids();
            check_catalog(
                self.catalog.as_ref(),
                shop_id,
                &product_ids,
                &variant_ids,
                &update.add_products,
            )
            .await?;
        }

        let plan = self
            .plans
            .update_plan(shop_id, plan_id, update)
            .await
            .map_err(|e| match e {
                PlanRepositoryError::ShopNotFound => UpdatePlanError::ShopNotFound,
                PlanRepositoryError::PlanNotFound => UpdatePlanError::PlanNotFound,
                PlanRepositoryError::FrequencyNotFound(id) => {
                    warn!(plan_id, frequency_id = id, "Update names a foreign frequency");
                    UpdatePlanError::FrequencyNotFound(id)
                }
                PlanRepositoryError::DatabaseError(msg) => {
                    error!(shop_id, plan_id, error = %msg, "Failed to update subscription plan");
                    UpdatePlanError::RepositoryError(msg)
                }
            })?;

        info!(shop_id, plan_id, "Subscription plan updated");
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::application::domain::{CatalogError, CatalogSnapshot, ProductSelection};
    use crate::subscription::application::domain::entities::{
        DeleteProducts, FrequencyFields, FrequencyUpdate, PlanStatus,
    };
    use crate::tests::support::mocks::{sample_plan, MockCatalog, MockPlans};
    use maplit::hashmap;

    fn catalog() -> MockCatalog {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_fetch_snapshot()
            .times(1)
            .returning(|_| Ok(CatalogSnapshot::new(hashmap! { 10 => vec![100, 101] })));
        catalog
    }

    fn untouched_catalog() -> MockCatalog {
        let mut catalog = MockCatalog::new();
        catalog.expect_fetch_snapshot().times(0);
        catalog
    }

    #[tokio::test]
    async fn test_simple_fields_skip_catalog() {
        let mut plans = MockPlans::new();
        plans
            .expect_update_plan()
            .withf(|shop, id, u| {
                *shop == 1 && *id == 7 && u.name.as_deref() == Some("Gold")
            })
            .times(1)
            .returning(|shop, id, _| Ok(sample_plan(id, shop, "Gold")));
        let service = UpdatePlanService::new(Arc::new(untouched_catalog()), Arc::new(plans));

        let plan = service
            .execute(
                1,
                7,
                PlanUpdate {
                    name: Some(" Gold ".to_string()),
                    status: Some(PlanStatus::Draft),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(plan.name, "Gold");
    }

    #[tokio::test]
    async fn test_delete_of_product_gone_from_storefront_skips_catalog() {
        let mut plans = MockPlans::new();
        plans
            .expect_update_plan()
            .withf(|_, _, u| u.delete_products.product_ids == vec![999])
            .times(1)
            .returning(|shop, id, _| Ok(sample_plan(id, shop, "Plan")));
        let service = UpdatePlanService::new(Arc::new(untouched_catalog()), Arc::new(plans));

        let result = service
            .execute(
                1,
                7,
                PlanUpdate {
                    delete_products: DeleteProducts {
                        product_ids: vec![999],
                        variant_ids: vec![555],
                    },
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_added_variant_rejected_before_write() {
        let mut plans = MockPlans::new();
        plans.expect_update_plan().times(0);
        let service = UpdatePlanService::new(Arc::new(catalog()), Arc::new(plans));

        let err = service
            .execute(
                1,
                7,
                PlanUpdate {
                    add_products: vec![ProductSelection {
                        product_id: 10,
                        variant_ids: vec![555],
                    }],
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            UpdatePlanError::InvalidReference(CatalogError::VariantNotFound(555))
        );
    }

    #[tokio::test]
    async fn test_add_products_validated_against_one_snapshot() {
        let mut plans = MockPlans::new();
        plans
            .expect_update_plan()
            .times(1)
            .returning(|shop, id, _| Ok(sample_plan(id, shop, "Plan")));
        let service = UpdatePlanService::new(Arc::new(catalog()), Arc::new(plans));

        let result = service
            .execute(
                1,
                7,
                PlanUpdate {
                    add_products: vec![
                        ProductSelection {
                            product_id: 10,
                            variant_ids: vec![100],
                        },
                        ProductSelection {
                            product_id: 10,
                            variant_ids: vec![101],
                        },
                    ],
                    ..Default::default()
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_frequency_update_is_validation_error() {
        let mut plans = MockPlans::new();
        plans.expect_update_plan().times(0);
        let service = UpdatePlanService::new(Arc::new(untouched_catalog()), Arc::new(plans));

        let err = service
            .execute(
                1,
                7,
                PlanUpdate {
                    update_frequency: vec![FrequencyUpdate {
                        id: 3,
                        fields: FrequencyFields {
                            max_cycles: Some(-2),
                            ..Default::default()
                        },
                    }],
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UpdatePlanError::Validation(_)));
    }

    #[tokio::test]
    async fn test_foreign_frequency_surfaces_its_id() {
        let mut plans = MockPlans::new();
        plans
            .expect_update_plan()
            .returning(|_, _, _| Err(PlanRepositoryError::FrequencyNotFound(42)));
        let service = UpdatePlanService::new(Arc::new(untouched_catalog()), Arc::new(plans));

        let err = service
            .execute(
                1,
                7,
                PlanUpdate {
                    removed_frequency: vec![42],
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err, UpdatePlanError::FrequencyNotFound(42));
    }

    #[tokio::test]
    async fn test_missing_plan() {
        let mut plans = MockPlans::new();
        plans
            .expect_update_plan()
            .returning(|_, _, _| Err(PlanRepositoryError::PlanNotFound));
        let service = UpdatePlanService::new(Arc::new(untouched_catalog()), Arc::new(plans));

        assert_eq!(
            service
                .execute(2, 7, PlanUpdate::default())
                .await
                .unwrap_err(),
            UpdatePlanError::PlanNotFound
        );
    }
}
