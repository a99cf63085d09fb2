pub mod plan_input;

pub use plan_input::{validate_plan_name, PlanInputError};
