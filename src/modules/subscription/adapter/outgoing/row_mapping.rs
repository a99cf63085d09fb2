use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};

use super::sea_orm_entity::{subscription_frequencies, subscription_plans, subscriptions};
use crate::catalog::application::domain::ProductSelection;
use crate::subscription::application::domain::entities::{
    Frequency, FrequencyFields, Plan, Subscription,
};

/// A stored enum string that no longer parses.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unreadable value '{value}' in column {column}")]
pub struct CorruptRow {
    pub column: &'static str,
    pub value: String,
}

fn parse<T: FromStr>(column: &'static str, raw: &str) -> Result<T, CorruptRow> {
    raw.parse::<T>().map_err(|_| CorruptRow {
        column,
        value: raw.to_string(),
    })
}

fn parse_opt<T: FromStr>(column: &'static str, raw: Option<&str>) -> Result<Option<T>, CorruptRow> {
    raw.map(|v| parse(column, v)).transpose()
}

fn opt_str<T: AsRef<str>>(value: &Option<T>) -> Option<String> {
    value.as_ref().map(|v| v.as_ref().to_string())
}

pub fn plan_from_model(model: subscription_plans::Model) -> Result<Plan, CorruptRow> {
    Ok(Plan {
        id: model.id,
        shop_id: model.shop_id,
        status: parse("subscription_plans.status", &model.status)?,
        name: model.name,
        is_deleted: model.is_deleted,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

pub fn frequency_from_model(model: subscription_frequencies::Model) -> Result<Frequency, CorruptRow> {
    Ok(Frequency {
        id: model.id,
        subscription_plan_id: model.subscription_plan_id,
        fields: FrequencyFields {
            plan_type: parse_opt("plan_type", model.plan_type.as_deref())?,
            name: model.name,
            description: model.description,
            frequency_interval: parse_opt("frequency_interval", model.frequency_interval.as_deref())?,
            frequency_order: model.frequency_order,
            billing_frequency_count: model.billing_frequency_count,
            billing_frequency_interval: parse_opt(
                "billing_frequency_interval",
                model.billing_frequency_interval.as_deref(),
            )?,
            specific_day_enabled: model.specific_day_enabled,
            frequency_type: parse_opt("frequency_type", model.frequency_type.as_deref())?,
            specific_day_value: model.specific_day_value,
            max_cycles: model.max_cycles,
            min_cycles: model.min_cycles,
            cut_off: model.cut_off,
            discount_enabled: model.discount_enabled,
            discount_offer: model.discount_offer,
            discount_type: parse_opt("discount_type", model.discount_type.as_deref())?,
            after_cycle1: model.after_cycle1,
            discount_enabled2: model.discount_enabled2,
            discount_type2: parse_opt("discount_type2", model.discount_type2.as_deref())?,
            discount_offer2: model.discount_offer2,
            after_cycle2: model.after_cycle2,
            inventory_policy_reserve: parse_opt(
                "inventory_policy_reserve",
                model.inventory_policy_reserve.as_deref(),
            )?,
        },
    })
}

/// Active model carrying every frequency field. Ids and timestamps are left to the caller.
pub fn frequency_active_model(
    plan_id: i32,
    fields: &FrequencyFields,
) -> subscription_frequencies::ActiveModel {
    subscription_frequencies::ActiveModel {
        id: NotSet,
        subscription_plan_id: Set(plan_id),
        plan_type: Set(opt_str(&fields.plan_type)),
        name: Set(fields.name.clone()),
        description: Set(fields.description.clone()),
        frequency_interval: Set(opt_str(&fields.frequency_interval)),
        frequency_order: Set(fields.frequency_order),
        billing_frequency_count: Set(fields.billing_frequency_count),
        billing_frequency_interval: Set(opt_str(&fields.billing_frequency_interval)),
        specific_day_enabled: Set(fields.specific_day_enabled),
        frequency_type: Set(opt_str(&fields.frequency_type)),
        specific_day_value: Set(fields.specific_day_value),
        max_cycles: Set(fields.max_cycles),
        min_cycles: Set(fields.min_cycles),
        cut_off: Set(fields.cut_off),
        discount_enabled: Set(fields.discount_enabled),
        discount_offer: Set(fields.discount_offer),
        discount_type: Set(opt_str(&fields.discount_type)),
        after_cycle1: Set(fields.after_cycle1),
        discount_enabled2: Set(fields.discount_enabled2),
        discount_type2: Set(opt_str(&fields.discount_type2)),
        discount_offer2: Set(fields.discount_offer2),
        after_cycle2: Set(fields.after_cycle2),
        inventory_policy_reserve: Set(opt_str(&fields.inventory_policy_reserve)),
        created_at: NotSet,
        updated_at: NotSet,
    }
}

pub fn subscription_from_model(model: subscriptions::Model) -> Result<Subscription, CorruptRow> {
    Ok(Subscription {
        id: model.id,
        shop_id: model.shop_id,
        subscription_plan_id: model.subscription_plan_id,
        frequency_id: model.frequency_id,
        product_id: model.product_id,
        customer_id: model.customer_id,
        user_id: model.user_id,
        status: parse("subscriptions.status", &model.status)?,
        is_deleted: model.is_deleted,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

/// Folds selections by product, dropping duplicate products and variants.
pub fn merge_selections(selections: &[ProductSelection]) -> BTreeMap<i64, BTreeSet<i64>> {
    let mut merged: BTreeMap<i64, BTreeSet<i64>> = BTreeMap::new();
    for selection in selections {
        merged
            .entry(selection.product_id)
            .or_default()
            .extend(selection.variant_ids.iter().copied());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::application::domain::entities::{
        DiscountType, FrequencyInterval, InventoryPolicy, PlanStatus,
    };

    fn frequency_row() -> subscription_frequencies::Model {
        let now = Utc::now();
        subscription_frequencies::Model {
            id: 3,
            subscription_plan_id: 1,
            plan_type: Some("PREPAID".to_string()),
            name: Some("Monthly".to_string()),
            description: None,
            frequency_interval: Some("MONTH".to_string()),
            frequency_order: Some(1),
            billing_frequency_count: Some(1),
            billing_frequency_interval: Some("MONTH".to_string()),
            specific_day_enabled: false,
            frequency_type: None,
            specific_day_value: None,
            max_cycles: None,
            min_cycles: None,
            cut_off: None,
            discount_enabled: true,
            discount_offer: Some(10.0),
            discount_type: Some("PERCENTAGE".to_string()),
            after_cycle1: 0,
            discount_enabled2: false,
            discount_type2: None,
            discount_offer2: None,
            after_cycle2: 0,
            inventory_policy_reserve: Some("ON_FULLFILLMENT".to_string()),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn test_frequency_row_maps_enums() {
        let frequency = frequency_from_model(frequency_row()).unwrap();

        assert_eq!(frequency.fields.frequency_interval, Some(FrequencyInterval::Month));
        assert_eq!(frequency.fields.discount_type, Some(DiscountType::Percentage));
        assert_eq!(
            frequency.fields.inventory_policy_reserve,
            Some(InventoryPolicy::OnFullfillment)
        );
    }

    #[test]
    fn test_frequency_fields_survive_write_mapping() {
        let fields = frequency_from_model(frequency_row()).unwrap().fields;
        let active = frequency_active_model(9, &fields);

        assert_eq!(active.subscription_plan_id, Set(9));
        assert_eq!(active.discount_type, Set(Some("PERCENTAGE".to_string())));
        assert_eq!(active.billing_frequency_interval, Set(Some("MONTH".to_string())));
        assert_eq!(active.id, NotSet);
    }

    #[test]
    fn test_unknown_status_is_corrupt() {
        let now = Utc::now();
        let err = plan_from_model(subscription_plans::Model {
            id: 1,
            shop_id: 1,
            name: "Plan".to_string(),
            status: "RETIRED".to_string(),
            is_deleted: false,
            created_at: now.into(),
            updated_at: now.into(),
        })
        .unwrap_err();

        assert_eq!(err.value, "RETIRED");
        assert_eq!(PlanStatus::default().as_ref(), "ACTIVE");
    }

    #[test]
    fn test_merge_selections_dedupes() {
        let merged = merge_selections(&[
            ProductSelection {
                product_id: 10,
                variant_ids: vec![100, 100],
            },
            ProductSelection {
                product_id: 10,
                variant_ids: vec![101],
            },
            ProductSelection {
                product_id: 20,
                variant_ids: vec![],
            },
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[&10].iter().copied().collect::<Vec<_>>(), vec![100, 101]);
        assert!(merged[&20].is_empty());
    }
}
