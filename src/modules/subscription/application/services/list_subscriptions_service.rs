use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::subscription::application::domain::entities::{Subscription, SubscriptionScope};
use crate::subscription::application::ports::incoming::use_cases::{
    ListSubscriptionsError, ListSubscriptionsRequest, ListSubscriptionsUseCase,
};
use crate::subscription::application::ports::outgoing::SubscriptionRepository;

pub struct ListSubscriptionsService {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl ListSubscriptionsService {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    /// Admins see everything or one shop; everyone else sees only their own records.
    fn scope_for(request: &ListSubscriptionsRequest) -> Result<SubscriptionScope, ListSubscriptionsError> {
        match (request.is_admin, request.shop_id) {
            (true, Some(shop_id)) => Ok(SubscriptionScope::Shop(shop_id)),
            (true, None) => Ok(SubscriptionScope::All),
            (false, Some(shop_id)) => {
                warn!(caller = %request.caller, shop_id, "Non-admin asked for a shop's subscriptions");
                Err(ListSubscriptionsError::Forbidden)
            }
            (false, None) => Ok(SubscriptionScope::User(request.caller.value())),
        }
    }
}

#[async_trait]
impl ListSubscriptionsUseCase for ListSubscriptionsService {
    async fn execute(
        &self,
        request: ListSubscriptionsRequest,
    ) -> Result<Vec<Subscription>, ListSubscriptionsError> {
        let scope = Self::scope_for(&request)?;

        self.subscriptions
            .list_subscriptions(scope)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list subscriptions");
                ListSubscriptionsError::RepositoryError(e.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use crate::tests::support::mocks::{sample_subscription, MockSubscriptions};

    fn request(is_admin: bool, shop_id: Option<i32>) -> ListSubscriptionsRequest {
        ListSubscriptionsRequest {
            caller: UserId::from(2),
            is_admin,
            shop_id,
        }
    }

    fn expecting(scope: SubscriptionScope) -> ListSubscriptionsService {
        let mut repo = MockSubscriptions::new();
        repo.expect_list_subscriptions()
            .withf(move |s| *s == scope)
            .times(1)
            .returning(|_| Ok(vec![sample_subscription(1, 1, Some(42))]));
        ListSubscriptionsService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn test_regular_user_sees_own_records() {
        let service = expecting(SubscriptionScope::User(2));

        assert_eq!(service.execute(request(false, None)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_non_admin_shop_scope_is_forbidden() {
        let mut repo = MockSubscriptions::new();
        repo.expect_list_subscriptions().times(0);
        let service = ListSubscriptionsService::new(Arc::new(repo));

        assert_eq!(
            service.execute(request(false, Some(1))).await.unwrap_err(),
            ListSubscriptionsError::Forbidden
        );
    }

    #[tokio::test]
    async fn test_admin_without_shop_sees_all() {
        let service = expecting(SubscriptionScope::All);

        assert!(service.execute(request(true, None)).await.is_ok());
    }

    #[tokio::test]
    async fn test_admin_with_shop_is_scoped() {
        let service = expecting(SubscriptionScope::Shop(1));

        assert!(service.execute(request(true, Some(1))).await.is_ok());
    }
}
