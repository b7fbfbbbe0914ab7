//! Rough student debt burden from an affordability gap

use serde::{Deserialize, Serialize};

use crate::assumptions::{DebtAssumptions, LoanAssumptions};
use crate::error::{require_non_negative, Result};
use crate::loan::standard_monthly_payment;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebtBurden {
    /// Borrowed over the whole course of study, whole dollars
    pub total_debt: f64,
    /// Standard-plan payment at the default federal rate, whole dollars
    pub monthly_payment: f64,
    /// Total debt as a percentage of expected starting salary, rounded
    pub debt_to_income_pct: f64,
    pub is_manageable: bool,
}

/// Estimate total borrowing and repayment load for a yearly cost
///
/// `annual_cost` is the price before EFC is applied (sticker cost, or cost
/// net of gift aid). The yearly shortfall after EFC and work-study is assumed
/// to be borrowed every year of study and repaid on the standard plan.
pub fn estimate_debt_burden(
    efc: f64,
    annual_cost: f64,
    debt: &DebtAssumptions,
    loan: &LoanAssumptions,
) -> Result<DebtBurden> {
    require_non_negative("efc", efc)?;
    require_non_negative("annual_cost", annual_cost)?;
    require_non_negative("work_study_income", debt.work_study_income)?;

    let annual_gap = (annual_cost - efc - debt.work_study_income).max(0.0);
    let total_debt = annual_gap * debt.years_of_borrowing as f64;

    let payments = loan.standard_term_years.saturating_mul(12);
    let monthly_payment =
        standard_monthly_payment(total_debt, loan.default_annual_rate / 12.0, payments).round();

    let debt_to_income_pct = if debt.starting_salary > 0.0 {
        total_debt / debt.starting_salary * 100.0
    } else {
        0.0
    };
    let payment_ceiling = debt.starting_salary / 12.0 * debt.max_payment_share;
    let is_manageable =
        debt_to_income_pct <= debt.max_debt_to_income_pct && monthly_payment <= payment_ceiling;

    Ok(DebtBurden {
        total_debt: total_debt.round(),
        monthly_payment,
        debt_to_income_pct: debt_to_income_pct.round(),
        is_manageable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burden(efc: f64, annual_cost: f64) -> DebtBurden {
        estimate_debt_burden(
            efc,
            annual_cost,
            &DebtAssumptions::default(),
            &LoanAssumptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_heavy_borrowing_not_manageable() {
        let result = burden(10_000.0, 25_000.0);
        assert_eq!(result.total_debt, 48_000.0);
        assert_eq!(result.monthly_payment, 521.0);
        assert_eq!(result.debt_to_income_pct, 107.0);
        assert!(!result.is_manageable);
    }

    #[test]
    fn test_light_borrowing_manageable() {
        let result = burden(20_000.0, 25_000.0);
        assert_eq!(result.total_debt, 8_000.0);
        assert_eq!(result.monthly_payment, 87.0);
        assert_eq!(result.debt_to_income_pct, 18.0);
        assert!(result.is_manageable);
    }

    #[test]
    fn test_covered_cost_has_no_debt() {
        let result = burden(30_000.0, 25_000.0);
        assert_eq!(result.total_debt, 0.0);
        assert_eq!(result.monthly_payment, 0.0);
        assert!(result.is_manageable);
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = estimate_debt_burden(
            0.0,
            -1.0,
            &DebtAssumptions::default(),
            &LoanAssumptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("annual_cost"));
    }
}
