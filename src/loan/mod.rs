//! Student loan amortization

mod amortize;
mod schedule;

pub use amortize::{
    amortize, normalize_rate, standard_monthly_payment, LoanInputs, LoanResult, RepaymentPlan,
};
pub use schedule::{
    amortization_schedule, payoff_date, yearly_schedule, AmortizationEntry, YearlyEntry,
};
