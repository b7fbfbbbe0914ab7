//! College ROI - cost, aid and earnings calculations for comparing colleges
//!
//! This library provides:
//! - Expected Family Contribution estimates and affordability tiering
//! - Lifetime ROI, payback period and discounted NPV of a degree
//! - Student loan amortization (standard, graduated, extended)
//! - Historical cost/salary/ROI trend extrapolation
//! - Institution comparison over CSV data
//!
//! All calculators are pure functions of their inputs and an explicit
//! [`Assumptions`] set.

pub mod affordability;
pub mod assumptions;
pub mod error;
pub mod institution;
pub mod loan;
pub mod roi;
pub mod scenario;
pub mod trend;

// Re-export commonly used types
pub use affordability::{
    assess_affordability, calculate_efc, AffordabilityAssessment, AffordabilityTier, EfcResult,
    FinancialProfile,
};
pub use assumptions::Assumptions;
pub use error::{CalcError, Result};
pub use institution::{Institution, InstitutionType};
pub use loan::{amortize, LoanInputs, LoanResult, RepaymentPlan};
pub use roi::{calculate_roi, Payback, RoiInputs, RoiResult};
pub use scenario::ScenarioRunner;
pub use trend::{project_trend, TrendAnchor, TrendPoint};
