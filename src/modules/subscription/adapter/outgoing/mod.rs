mod row_mapping;
pub mod sea_orm_entity;

pub mod plan_query_postgres;
pub mod plan_repository_postgres;
pub mod subscription_repository_postgres;

pub use plan_query_postgres::PlanQueryPostgres;
pub use plan_repository_postgres::PlanRepositoryPostgres;
pub use subscription_repository_postgres::SubscriptionRepositoryPostgres;
