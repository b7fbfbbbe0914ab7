//! Discounted view of the earnings premium

use super::calculator::RoiInputs;
use crate::error::{CalcError, Result};

/// PV of a level annual amount paid at the end of each of `years` years
pub fn pv_annuity_ordinary(amount: f64, years: u32, annual_rate: f64) -> f64 {
    if annual_rate.abs() < 1e-10 {
        return amount * years as f64;
    }

    let v = 1.0 / (1.0 + annual_rate);
    amount * (1.0 - v.powi(years as i32)) / annual_rate
}

/// Net present value of a degree
///
/// The selected total cost is paid up front and the annual earnings premium
/// arrives at the end of each career year, discounted at `discount_rate`.
/// This supplements the undiscounted lifetime figure; it does not replace it.
pub fn net_present_value(inputs: &RoiInputs, discount_rate: f64) -> Result<f64> {
    inputs.validate()?;
    if !discount_rate.is_finite() || !(0.0..1.0).contains(&discount_rate) {
        return Err(CalcError::invalid(
            "discount_rate",
            format!("must be a fraction in [0, 1), got {}", discount_rate),
        ));
    }

    let result = super::calculate_roi(inputs)?;
    let pv_premium = pv_annuity_ordinary(
        result.annual_earnings_premium,
        inputs.career_years,
        discount_rate,
    );

    Ok(pv_premium - result.total_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn inputs() -> RoiInputs {
        RoiInputs {
            annual_tuition: 35_000.0,
            annual_fees: 2_000.0,
            annual_room_board: None,
            annual_books_supplies: None,
            years_of_study: 4,
            median_earnings_10yr: 75_000.0,
            baseline_earnings: 40_000.0,
            include_room_board: false,
            include_books_supplies: false,
            career_years: 30,
            annual_grants: 0.0,
            annual_scholarships: 0.0,
        }
    }

    #[test]
    fn test_annuity_matches_explicit_sum() {
        let explicit: f64 = (1..=30).map(|t| 35_000.0 / 1.03_f64.powi(t)).sum();
        assert_abs_diff_eq!(pv_annuity_ordinary(35_000.0, 30, 0.03), explicit, epsilon = 1e-6);
    }

    #[test]
    fn test_npv_at_three_percent() {
        let npv = net_present_value(&inputs(), 0.03).unwrap();
        assert_abs_diff_eq!(npv, 538_015.45, epsilon = 0.01);
    }

    #[test]
    fn test_zero_discount_matches_net_roi() {
        let npv = net_present_value(&inputs(), 0.0).unwrap();
        assert_abs_diff_eq!(npv, 902_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_discount_rate_validated() {
        let err = net_present_value(&inputs(), 3.0).unwrap_err();
        assert_eq!(err.field(), Some("discount_rate"));
    }
}
