pub mod plan_query;
pub mod plan_repository;
pub mod subscription_repository;

pub use plan_query::{PlanFilter, PlanQuery, PlanQueryError};
pub use plan_repository::{PlanRepository, PlanRepositoryError};
pub use subscription_repository::{SubscriptionRepository, SubscriptionRepositoryError};
