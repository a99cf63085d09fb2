use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subscription_frequencies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub subscription_plan_id: i32,
    pub plan_type: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub frequency_interval: Option<String>,
    pub frequency_order: Option<i32>,
    pub billing_frequency_count: Option<i32>,
    pub billing_frequency_interval: Option<String>,
    pub specific_day_enabled: bool,
    pub frequency_type: Option<String>,
    pub specific_day_value: Option<i32>,
    pub max_cycles: Option<i32>,
    pub min_cycles: Option<i32>,
    pub cut_off: Option<i32>,
    pub discount_enabled: bool,
    pub discount_offer: Option<f64>,
    pub discount_type: Option<String>,
    #[sea_orm(column_name = "after_cycle1")]
    pub after_cycle1: i32,
    #[sea_orm(column_name = "discount_enabled2")]
    pub discount_enabled2: bool,
    #[sea_orm(column_name = "discount_type2")]
    pub discount_type2: Option<String>,
    #[sea_orm(column_name = "discount_offer2")]
    pub discount_offer2: Option<f64>,
    #[sea_orm(column_name = "after_cycle2")]
    pub after_cycle2: i32,
    pub inventory_policy_reserve: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
