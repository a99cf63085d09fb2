pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_referrals_table;
mod m20250301_000003_create_verification_codes_table;
mod m20250302_000001_create_shops_table;
mod m20250302_000002_create_subscription_plans_table;
mod m20250302_000003_create_subscription_plan_products_table;
mod m20250302_000004_create_subscriptions_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_referrals_table::Migration),
            Box::new(m20250301_000003_create_verification_codes_table::Migration),
            Box::new(m20250302_000001_create_shops_table::Migration),
            Box::new(m20250302_000002_create_subscription_plans_table::Migration),
            Box::new(m20250302_000003_create_subscription_plan_products_table::Migration),
            Box::new(m20250302_000004_create_subscriptions_table::Migration),
        ]
    }
}
