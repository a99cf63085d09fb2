use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use super::{check_catalog, CatalogCheckError};
use crate::catalog::application::ports::outgoing::CatalogSource;
use crate::subscription::application::domain::entities::{NewPlan, Plan};
use crate::subscription::application::domain::policies::validate_plan_name;
use crate::subscription::application::ports::incoming::use_cases::{
    CreatePlanCommand, CreatePlanError, CreatePlanUseCase,
};
use crate::subscription::application::ports::outgoing::{PlanRepository, PlanRepositoryError};

impl From<CatalogCheckError> for CreatePlanError {
    fn from(e: CatalogCheckError) -> Self {
        match e {
            CatalogCheckError::Invalid(e) => Self::InvalidReference(e),
            CatalogCheckError::ShopNotFound => Self::ShopNotFound,
            CatalogCheckError::Unavailable(msg) => Self::CatalogUnavailable(msg),
        }
    }
}

pub struct CreatePlanService {
    catalog: Arc<dyn CatalogSource>,
    plans: Arc<dyn PlanRepository>,
}

impl CreatePlanService {
    pub fn new(catalog: Arc<dyn CatalogSource>, plans: Arc<dyn PlanRepository>) -> Self {
        Self { catalog, plans }
    }
}

#[async_trait]
impl CreatePlanUseCase for CreatePlanService {
    async fn execute(
        &self,
        shop_id: i32,
        command: CreatePlanCommand,
    ) -> Result<Plan, CreatePlanError> {
        let name = validate_plan_name(&command.name)
            .map_err(|e| CreatePlanError::Validation(e.to_string()))?;

        for frequency in &command.frequencies {
            frequency
                .validate()
                .map_err(|e| CreatePlanError::Validation(e.to_string()))?;
        }

        if !command.products.is_empty() {
            let product_ids: Vec<i64> = command.products.iter().map(|p| p.product_id).collect();
            let variant_ids: Vec<i64> = command
                .products
                .iter()
                .flat_map(|p| p.variant_ids.iter().copied())
                .collect();

            check_catalog(
                self.catalog.as_ref(),
                shop_id,
                &product_ids,
                &variant_ids,
                &command.products,
            )
            .await?;
        }

        let plan = self
            .plans
            .create_plan(NewPlan {
                shop_id,
                name,
                status: command.status,
                frequencies: command.frequencies,
                products: command.products,
            })
            .await
            .map_err(|e| match e {
                PlanRepositoryError::ShopNotFound => {
                    warn!(shop_id, "Plan creation for an unknown or deleted shop");
                    CreatePlanError::ShopNotFound
                }
                other => {
                    error!(shop_id, error = %other, "Failed to create subscription plan");
                    CreatePlanError::RepositoryError(other.to_string())
                }
            })?;

        info!(shop_id, plan_id = plan.id, "Subscription plan created");
        Ok(plan)
    }
}
