//! Household aid eligibility and institution affordability

mod debt;
mod efc;
mod tier;

pub use debt::{estimate_debt_burden, DebtBurden};
pub use efc::{calculate_efc, EfcBreakdown, EfcResult, FinancialProfile};
pub use tier::{assess_affordability, AffordabilityAssessment, AffordabilityTier};
