use crate::subscription::application::domain::entities::{DiscountType, FrequencyFields};

const MAX_PERCENTAGE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanInputError {
    #[error("Plan name must not be empty")]
    EmptyName,

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("min_cycles ({min}) must not exceed max_cycles ({max})")]
    CycleBounds { min: i32, max: i32 },

    #[error("{0} must be a percentage between 0 and 100")]
    PercentageOutOfRange(&'static str),
}

pub fn validate_plan_name(name: &str) -> Result<String, PlanInputError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PlanInputError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn non_negative(field: &'static str, value: Option<i32>) -> Result<(), PlanInputError> {
    match value {
        Some(v) if v < 0 => Err(PlanInputError::Negative(field)),
        _ => Ok(()),
    }
}

fn check_discount(
    field: &'static str,
    offer: Option<f64>,
    kind: Option<DiscountType>,
) -> Result<(), PlanInputError> {
    let Some(offer) = offer else {
        return Ok(());
    };
    if offer < 0.0 {
        return Err(PlanInputError::Negative(field));
    }
    if kind == Some(DiscountType::Percentage) && offer > MAX_PERCENTAGE {
        return Err(PlanInputError::PercentageOutOfRange(field));
    }
    Ok(())
}

impl FrequencyFields {
    pub fn validate(&self) -> Result<(), PlanInputError> {
        non_negative("frequency_order", self.frequency_order)?;
        non_negative("billing_frequency_count", self.billing_frequency_count)?;
        non_negative("specific_day_value", self.specific_day_value)?;
        non_negative("max_cycles", self.max_cycles)?;
        non_negative("min_cycles", self.min_cycles)?;
        non_negative("cut_off", self.cut_off)?;
        non_negative("after_cycle1", Some(self.after_cycle1))?;
        non_negative("after_cycle2", Some(self.after_cycle2))?;

        if let (Some(min), Some(max)) = (self.min_cycles, self.max_cycles) {
            if min > max {
                return Err(PlanInputError::CycleBounds { min, max });
            }
        }

        check_discount("discount_offer", self.discount_offer, self.discount_type)?;
        check_discount("discount_offer2", self.discount_offer2, self.discount_type2)?;
        Ok(())
    }
}
