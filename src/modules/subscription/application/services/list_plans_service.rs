use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::subscription::application::domain::entities::PlanView;
use crate::subscription::application::ports::incoming::use_cases::{
    ListPlansError, ListPlansUseCase,
};
use crate::subscription::application::ports::outgoing::{PlanFilter, PlanQuery, PlanQueryError};

pub struct ListPlansService {
    query: Arc<dyn PlanQuery>,
}

impl ListPlansService {
    pub fn new(query: Arc<dyn PlanQuery>) -> Self {
        Self { query }
    }
}

#[async_trait]
impl ListPlansUseCase for ListPlansService {
    async fn execute(
        &self,
        shop_id: i32,
        filter: PlanFilter,
    ) -> Result<Vec<PlanView>, ListPlansError> {
        let plans = self
            .query
            .list_plans(shop_id, filter)
            .await
            .map_err(|PlanQueryError::DatabaseError(msg)| {
                error!(shop_id, error = %msg, "Failed to list subscription plans");
                ListPlansError::RepositoryError(msg)
            })?;

        debug!(shop_id, count = plans.len(), "Listed subscription plans");
        Ok(plans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::mocks::{sample_plan, MockPlanLister};

    #[tokio::test]
    async fn test_filter_is_passed_through() {
        let mut query = MockPlanLister::new();
        query
            .expect_list_plans()
            .withf(|shop, f| *shop == 3 && f.id == Some(9) && f.include_products)
            .returning(|shop, _| {
                Ok(vec![PlanView {
                    plan: sample_plan(9, shop, "Gold"),
                    product_count: 2,
                    frequency_count: 1,
                    frequencies: None,
                    products: Some(vec![]),
                }])
            });
        let service = ListPlansService::new(Arc::new(query));

        let plans = service
            .execute(
                3,
                PlanFilter {
                    id: Some(9),
                    include_frequencies: false,
                    include_products: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].product_count, 2);
    }

    #[tokio::test]
    async fn test_query_error_maps() {
        let mut query = MockPlanLister::new();
        query
            .expect_list_plans()
            .returning(|_, _| Err(PlanQueryError::DatabaseError("timeout".to_string())));
        let service = ListPlansService::new(Arc::new(query));

        assert_eq!(
            service.execute(1, PlanFilter::default()).await.unwrap_err(),
            ListPlansError::RepositoryError("timeout".to_string())
        );
    }
}
