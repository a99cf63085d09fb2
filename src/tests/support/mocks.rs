use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockall::mock;

use crate::catalog::application::domain::CatalogSnapshot;
use crate::catalog::application::ports::outgoing::{CatalogSource, CatalogSourceError};
use crate::subscription::application::domain::entities::{
    NewPlan, NewSubscription, Plan, PlanStatus, PlanUpdate, PlanView, Subscription,
    SubscriptionScope, SubscriptionStatus,
};
use crate::subscription::application::ports::outgoing::{
    PlanFilter, PlanQuery, PlanQueryError, PlanRepository, PlanRepositoryError,
    SubscriptionRepository, SubscriptionRepositoryError,
};

mock! {
    pub Catalog {}

    #[async_trait]
    impl CatalogSource for Catalog {
        async fn fetch_snapshot(&self, shop_id: i32) -> Result<CatalogSnapshot, CatalogSourceError>;
    }
}

mock! {
    pub Plans {}

    #[async_trait]
    impl PlanRepository for Plans {
        async fn create_plan(&self, plan: NewPlan) -> Result<Plan, PlanRepositoryError>;
        async fn update_plan(
            &self,
            shop_id: i32,
            plan_id: i32,
            update: PlanUpdate,
        ) -> Result<Plan, PlanRepositoryError>;
    }
}

mock! {
    pub PlanLister {}

    #[async_trait]
    impl PlanQuery for PlanLister {
        async fn list_plans(
            &self,
            shop_id: i32,
            filter: PlanFilter,
        ) -> Result<Vec<PlanView>, PlanQueryError>;
    }
}

mock! {
    pub Subscriptions {}

    #[async_trait]
    impl SubscriptionRepository for Subscriptions {
        async fn create_subscription(
            &self,
            data: NewSubscription,
        ) -> Result<Subscription, SubscriptionRepositoryError>;
        async fn list_subscriptions(
            &self,
            scope: SubscriptionScope,
        ) -> Result<Vec<Subscription>, SubscriptionRepositoryError>;
    }
}

pub fn sample_plan(id: i32, shop_id: i32, name: &str) -> Plan {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Plan {
        id,
        shop_id,
        name: name.to_string(),
        status: PlanStatus::Active,
        is_deleted: false,
        created_at: at,
        updated_at: at,
    }
}

/// Created by account 2.
pub fn sample_subscription(id: i32, shop_id: i32, customer_id: Option<i64>) -> Subscription {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Subscription {
        id,
        shop_id,
        subscription_plan_id: 4,
        frequency_id: Some(8),
        product_id: 10,
        customer_id,
        user_id: Some(2),
        status: SubscriptionStatus::Active,
        is_deleted: false,
        created_at: at,
        updated_at: at,
    }
}
