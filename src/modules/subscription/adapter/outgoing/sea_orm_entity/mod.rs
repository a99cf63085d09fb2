pub mod subscription_frequencies;
pub mod subscription_plan_product_variants;
pub mod subscription_plan_products;
pub mod subscription_plans;
pub mod subscriptions;
