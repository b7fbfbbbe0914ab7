//! Month-by-month and year-by-year amortization tables

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::amortize::{payment_for_month, standard_monthly_payment, LoanInputs};
use crate::assumptions::LoanAssumptions;
use crate::error::{CalcError, Result};

/// One row of a monthly amortization table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// 1-based payment number
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    /// Balance after this payment, floored at zero
    pub balance: f64,
}

/// Monthly rows rolled up per repayment year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyEntry {
    /// 1-based repayment year
    pub year: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub remaining_balance: f64,
}

/// Step a balance forward one payment at a time
pub(crate) fn simulate_balance<F>(
    principal: f64,
    monthly_rate: f64,
    payments: u32,
    payment_due: F,
) -> Vec<AmortizationEntry>
where
    F: Fn(u32) -> f64,
{
    let mut balance = principal;
    let mut entries = Vec::with_capacity(payments as usize);

    for month in 0..payments {
        let payment = payment_due(month);
        let interest = balance * monthly_rate;
        let principal_paid = payment - interest;
        balance = (balance - principal_paid).max(0.0);

        entries.push(AmortizationEntry {
            month: month + 1,
            payment,
            principal: principal_paid,
            interest,
            balance,
        });
    }

    entries
}

/// Full monthly amortization table for a loan
pub fn amortization_schedule(
    inputs: &LoanInputs,
    loan: &LoanAssumptions,
) -> Result<Vec<AmortizationEntry>> {
    let (_, monthly_rate, payments) = inputs.terms()?;
    let standard = standard_monthly_payment(inputs.principal, monthly_rate, payments);

    Ok(simulate_balance(inputs.principal, monthly_rate, payments, |month| {
        payment_for_month(inputs.plan, standard, loan.graduated_step_rate, month)
    }))
}

/// Amortization table grouped into repayment years
pub fn yearly_schedule(inputs: &LoanInputs, loan: &LoanAssumptions) -> Result<Vec<YearlyEntry>> {
    let monthly = amortization_schedule(inputs, loan)?;

    Ok(monthly
        .chunks(12)
        .enumerate()
        .map(|(index, months)| YearlyEntry {
            year: index as u32 + 1,
            payment: months.iter().map(|m| m.payment).sum(),
            principal: months.iter().map(|m| m.principal).sum(),
            interest: months.iter().map(|m| m.interest).sum(),
            remaining_balance: months.last().map(|m| m.balance).unwrap_or(0.0),
        })
        .collect())
}

/// `start` plus the full term (`term_years * 12` months)
pub fn payoff_date(start: NaiveDate, inputs: &LoanInputs) -> Result<NaiveDate> {
    if inputs.term_years == 0 {
        return Err(CalcError::invalid("term_years", "must be > 0"));
    }
    start
        .checked_add_months(Months::new(inputs.number_of_payments()))
        .ok_or_else(|| CalcError::invalid("term_years", "payoff date out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::amortize;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_standard_schedule_pays_off() {
        let inputs = LoanInputs::standard(30_000.0, 0.055, 10);
        let schedule = amortization_schedule(&inputs, &LoanAssumptions::default()).unwrap();

        assert_eq!(schedule.len(), 120);
        assert_eq!(schedule[0].month, 1);
        assert_abs_diff_eq!(schedule[0].interest, 137.5, epsilon = 1e-9);
        assert_abs_diff_eq!(schedule[119].balance, 0.0, epsilon = 0.01);

        let principal: f64 = schedule.iter().map(|e| e.principal).sum();
        assert_abs_diff_eq!(principal, 30_000.0, epsilon = 0.01);
    }

    #[test]
    fn test_schedule_totals_match_amortize() {
        let loan = LoanAssumptions::default();
        for inputs in [
            LoanInputs::standard(18_000.0, 0.045, 10),
            LoanInputs::graduated(18_000.0, 0.045, 10),
        ] {
            let schedule = amortization_schedule(&inputs, &loan).unwrap();
            let result = amortize(&inputs, &loan).unwrap();
            let total: f64 = schedule.iter().map(|e| e.payment).sum();
            assert_abs_diff_eq!(total, result.total_payment, epsilon = 0.01);
        }
    }

    #[test]
    fn test_graduated_steps_each_year() {
        let inputs = LoanInputs::graduated(30_000.0, 0.055, 10);
        let schedule = amortization_schedule(&inputs, &LoanAssumptions::default()).unwrap();
        assert_eq!(schedule[0].payment, schedule[11].payment);
        assert!(schedule[12].payment > schedule[11].payment);
        assert!(schedule.iter().all(|e| e.balance >= 0.0));
    }

    #[test]
    fn test_yearly_rollup() {
        let inputs = LoanInputs::standard(24_000.0, 0.05, 10);
        let loan = LoanAssumptions::default();
        let monthly = amortization_schedule(&inputs, &loan).unwrap();
        let yearly = yearly_schedule(&inputs, &loan).unwrap();

        assert_eq!(yearly.len(), 10);
        assert_eq!(yearly[0].year, 1);
        assert_eq!(yearly[0].remaining_balance, monthly[11].balance);
        let first_year_interest: f64 = monthly[..12].iter().map(|e| e.interest).sum();
        assert_abs_diff_eq!(yearly[0].interest, first_year_interest, epsilon = 1e-9);
        assert!(yearly[1].interest < yearly[0].interest);
    }

    #[test]
    fn test_payoff_date() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let date = payoff_date(start, &LoanInputs::standard(10_000.0, 0.05, 10)).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2035, 1, 31).unwrap());
    }

    #[test]
    fn test_schedule_rejects_bad_rate() {
        let inputs = LoanInputs::standard(10_000.0, 101.0, 10);
        assert!(amortization_schedule(&inputs, &LoanAssumptions::default()).is_err());
    }
}
