//! Student loan repayment: standard and graduated plans

use serde::{Deserialize, Serialize};

use super::schedule::simulate_balance;
use crate::assumptions::LoanAssumptions;
use crate::error::{CalcError, Result};

/// Repayment plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentPlan {
    /// Fixed payment for the whole term
    Standard,
    /// Payment starts at the standard amount and steps up every 12 months
    Graduated,
}

/// Loan to amortize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInputs {
    pub principal: f64,

    /// Annual rate as a fraction (0.055) or a percentage (5.5)
    pub annual_rate: f64,

    pub term_years: u32,

    pub plan: RepaymentPlan,
}

impl LoanInputs {
    pub fn standard(principal: f64, annual_rate: f64, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate,
            term_years,
            plan: RepaymentPlan::Standard,
        }
    }

    pub fn graduated(principal: f64, annual_rate: f64, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate,
            term_years,
            plan: RepaymentPlan::Graduated,
        }
    }

    /// Standard payments stretched over the extended term
    pub fn extended(principal: f64, annual_rate: f64, loan: &LoanAssumptions) -> Self {
        Self::standard(principal, annual_rate, loan.extended_term_years)
    }

    pub fn number_of_payments(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }

    /// Validate and return (normalized annual rate, monthly rate, payment count)
    pub(crate) fn terms(&self) -> Result<(f64, f64, u32)> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(CalcError::invalid(
                "principal",
                format!("must be > 0, got {}", self.principal),
            ));
        }
        if self.term_years == 0 {
            return Err(CalcError::invalid("term_years", "must be > 0"));
        }
        let annual_rate = normalize_rate(self.annual_rate)?;
        Ok((annual_rate, annual_rate / 12.0, self.number_of_payments()))
    }
}

/// Output of amortization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    /// For the graduated plan this is the average over the term
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_payment: f64,
    pub number_of_payments: u32,
    /// Rate actually used, as a fraction
    pub annual_rate: f64,
}

/// Accept a rate in [0, 1] as a fraction or in (1, 100] as a percentage
pub fn normalize_rate(rate: f64) -> Result<f64> {
    if !rate.is_finite() || !(0.0..=100.0).contains(&rate) {
        return Err(CalcError::invalid(
            "annual_rate",
            format!("must be within [0, 1] or [0, 100], got {}", rate),
        ));
    }
    if rate > 1.0 {
        log::debug!("annual rate {} read as a percentage", rate);
        Ok(rate / 100.0)
    } else {
        Ok(rate)
    }
}

/// Fixed payment `P * r(1+r)^n / ((1+r)^n - 1)`, or `P / n` at zero rate
pub fn standard_monthly_payment(principal: f64, monthly_rate: f64, payments: u32) -> f64 {
    if payments == 0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return principal / payments as f64;
    }
    let growth = (1.0 + monthly_rate).powi(payments as i32);
    principal * (monthly_rate * growth) / (growth - 1.0)
}

/// Payment due in a given month (0-indexed) under the plan
pub(crate) fn payment_for_month(
    plan: RepaymentPlan,
    standard_payment: f64,
    step_rate: f64,
    month: u32,
) -> f64 {
    match plan {
        RepaymentPlan::Standard => standard_payment,
        RepaymentPlan::Graduated => {
            let year = month / 12;
            standard_payment * (1.0 + step_rate * year as f64)
        }
    }
}

/// Compute monthly payment, total interest and total paid for a loan
pub fn amortize(inputs: &LoanInputs, loan: &LoanAssumptions) -> Result<LoanResult> {
    let (annual_rate, monthly_rate, payments) = inputs.terms()?;
    let standard = standard_monthly_payment(inputs.principal, monthly_rate, payments);

    let (monthly_payment, total_payment) = match inputs.plan {
        RepaymentPlan::Standard => (standard, standard * payments as f64),
        RepaymentPlan::Graduated => {
            // Payments keep stepping up on schedule; the balance is floored
            // at zero but the scheduled amount is still counted as paid.
            let entries = simulate_balance(inputs.principal, monthly_rate, payments, |month| {
                payment_for_month(inputs.plan, standard, loan.graduated_step_rate, month)
            });
            let total_paid: f64 = entries.iter().map(|e| e.payment).sum();
            log::debug!(
                "graduated plan: {} payments, standard {:.2}, total paid {:.2}",
                payments,
                standard,
                total_paid
            );
            (total_paid / payments as f64, total_paid)
        }
    };

    Ok(LoanResult {
        monthly_payment,
        total_interest: total_payment - inputs.principal,
        total_payment,
        number_of_payments: payments,
        annual_rate,
    })
}
