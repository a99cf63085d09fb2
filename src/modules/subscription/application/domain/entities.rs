use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::catalog::application::domain::ProductSelection;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    #[default]
    Active,
    Inactive,
    Archived,
    Draft,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanType {
    PayAsYouGo,
    Prepaid,
    AdvancedPrepaid,
    PayAsYouGoPrepaid,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FrequencyInterval {
    Day,
    Week,
    Month,
    Year,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FrequencyType {
    OnPurchaseDay,
    SpecificDay,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// Stored spelling follows the storefront app's historical value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryPolicy {
    OnSale,
    OnFullfillment,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Paused,
    Cancelled,
    Expired,
    Failed,
}

/// Billing frequency settings, persisted exactly as supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FrequencyFields {
    pub plan_type: Option<PlanType>,
    #[schema(example = "Monthly")]
    pub name: Option<String>,
    pub description: Option<String>,
    pub frequency_interval: Option<FrequencyInterval>,
    pub frequency_order: Option<i32>,
    pub billing_frequency_count: Option<i32>,
    pub billing_frequency_interval: Option<FrequencyInterval>,
    #[serde(default)]
    pub specific_day_enabled: bool,
    pub frequency_type: Option<FrequencyType>,
    pub specific_day_value: Option<i32>,
    pub max_cycles: Option<i32>,
    pub min_cycles: Option<i32>,
    pub cut_off: Option<i32>,
    #[serde(default)]
    pub discount_enabled: bool,
    pub discount_offer: Option<f64>,
    pub discount_type: Option<DiscountType>,
    #[serde(default)]
    pub after_cycle1: i32,
    #[serde(default)]
    pub discount_enabled2: bool,
    pub discount_type2: Option<DiscountType>,
    pub discount_offer2: Option<f64>,
    #[serde(default)]
    pub after_cycle2: i32,
    pub inventory_policy_reserve: Option<InventoryPolicy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Frequency {
    pub id: i32,
    pub subscription_plan_id: i32,
    #[serde(flatten)]
    pub fields: FrequencyFields,
}

/// Replacement values for an existing frequency of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FrequencyUpdate {
    pub id: i32,
    #[serde(flatten)]
    pub fields: FrequencyFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Plan {
    pub id: i32,
    pub shop_id: i32,
    pub name: String,
    pub status: PlanStatus,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PlanProduct {
    pub id: i32,
    pub product_id: i64,
    pub variant_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PlanView {
    #[serde(flatten)]
    pub plan: Plan,
    pub product_count: i64,
    pub frequency_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequencies: Option<Vec<Frequency>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<PlanProduct>>,
}

#[derive(Debug, Clone)]
pub struct NewPlan {
    pub shop_id: i32,
    pub name: String,
    pub status: PlanStatus,
    pub frequencies: Vec<FrequencyFields>,
    pub products: Vec<ProductSelection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeleteProducts {
    #[serde(default)]
    pub product_ids: Vec<i64>,
    #[serde(default)]
    pub variant_ids: Vec<i64>,
}

impl DeleteProducts {
    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty() && self.variant_ids.is_empty()
    }
}

/// Partial plan update. Absent fields leave the plan untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanUpdate {
    pub name: Option<String>,
    pub status: Option<PlanStatus>,
    pub is_deleted: Option<bool>,
    pub delete_products: DeleteProducts,
    pub add_products: Vec<ProductSelection>,
    pub removed_frequency: Vec<i32>,
    pub add_frequency: Vec<FrequencyFields>,
    pub update_frequency: Vec<FrequencyUpdate>,
}

impl PlanUpdate {
    /// Only additions are checked against the catalog. Deletions may name
    /// products the storefront no longer has.
    pub fn references_catalog(&self) -> bool {
        !self.add_products.is_empty()
    }

    /// Product and variant ids being added, in input order.
    pub fn catalog_ids(&self) -> (Vec<i64>, Vec<i64>) {
        let product_ids = self.add_products.iter().map(|p| p.product_id).collect();
        let variant_ids = self
            .add_products
            .iter()
            .flat_map(|p| p.variant_ids.iter().copied())
            .collect();

        (product_ids, variant_ids)
    }

    /// Frequency ids that must already belong to the plan.
    pub fn referenced_frequency_ids(&self) -> Vec<i32> {
        self.removed_frequency
            .iter()
            .copied()
            .chain(self.update_frequency.iter().map(|f| f.id))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Subscription {
    pub id: i32,
    pub shop_id: i32,
    pub subscription_plan_id: i32,
    pub frequency_id: Option<i32>,
    pub product_id: i64,
    /// Storefront customer id.
    pub customer_id: Option<i64>,
    /// Account that created the subscription.
    pub user_id: Option<i32>,
    pub status: SubscriptionStatus,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub shop_id: i32,
    pub subscription_plan_id: i32,
    pub frequency_id: i32,
    pub product_id: i64,
    pub customer_id: Option<i64>,
    pub user_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionScope {
    All,
    Shop(i32),
    /// Subscriptions created by one account.
    User(i32),
}
