//! Lifetime earnings premium, net ROI and payback
//!
//! Earnings are projected without compounding or discounting:
//! `premium * career_years`. See `net_present_value` for the discounted view.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assumptions::{DEFAULT_BASELINE_EARNINGS, DEFAULT_CAREER_YEARS};
use crate::error::{require_non_negative, require_positive_count, Result};

fn default_baseline_earnings() -> f64 {
    DEFAULT_BASELINE_EARNINGS
}

fn default_career_years() -> u32 {
    DEFAULT_CAREER_YEARS
}

/// Cost and earnings assumptions for one program of study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiInputs {
    pub annual_tuition: f64,
    pub annual_fees: f64,
    #[serde(default)]
    pub annual_room_board: Option<f64>,
    #[serde(default)]
    pub annual_books_supplies: Option<f64>,
    pub years_of_study: u32,

    /// Annual earnings at the 10-year mark
    pub median_earnings_10yr: f64,
    /// Non-degree comparison earnings
    #[serde(default = "default_baseline_earnings")]
    pub baseline_earnings: f64,

    /// Count room & board toward the selected total cost
    #[serde(default)]
    pub include_room_board: bool,
    /// Count books & supplies toward the selected total cost
    #[serde(default)]
    pub include_books_supplies: bool,

    #[serde(default = "default_career_years")]
    pub career_years: u32,

    /// Yearly grant aid; loans and work-study are not gift aid
    #[serde(default)]
    pub annual_grants: f64,
    #[serde(default)]
    pub annual_scholarships: f64,
}

impl RoiInputs {
    pub fn validate(&self) -> Result<()> {
        require_non_negative("annual_tuition", self.annual_tuition)?;
        require_non_negative("annual_fees", self.annual_fees)?;
        if let Some(room_board) = self.annual_room_board {
            require_non_negative("annual_room_board", room_board)?;
        }
        if let Some(books) = self.annual_books_supplies {
            require_non_negative("annual_books_supplies", books)?;
        }
        require_positive_count("years_of_study", self.years_of_study)?;
        require_non_negative("median_earnings_10yr", self.median_earnings_10yr)?;
        require_non_negative("baseline_earnings", self.baseline_earnings)?;
        require_positive_count("career_years", self.career_years)?;
        require_non_negative("annual_grants", self.annual_grants)?;
        require_non_negative("annual_scholarships", self.annual_scholarships)?;
        Ok(())
    }
}

/// Years to recover a cost from the annual earnings premium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payback {
    Finite(f64),
    /// Premium is zero or negative
    Never,
}

impl Payback {
    fn from_cost(total_cost: f64, annual_premium: f64) -> Self {
        if annual_premium > 0.0 {
            Payback::Finite(total_cost / annual_premium)
        } else {
            Payback::Never
        }
    }

    pub fn years(&self) -> Option<f64> {
        match self {
            Payback::Finite(years) => Some(*years),
            Payback::Never => None,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Payback::Never)
    }

    /// Display form: "Never", "Less than 1 year", "1 year", "4.2 years"
    pub fn label(&self) -> String {
        match self {
            Payback::Never => "Never".to_string(),
            Payback::Finite(years) if *years < 1.0 => "Less than 1 year".to_string(),
            Payback::Finite(years) if *years == 1.0 => "1 year".to_string(),
            Payback::Finite(years) => format!("{:.1} years", years),
        }
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Every cost view side by side, so callers can switch views without recomputing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub total_tuition_fees: f64,
    pub total_room_board: f64,
    pub total_books_supplies: f64,
    /// Tuition & fees plus whichever optional components were selected
    pub total_cost: f64,
    pub total_cost_with_all_expenses: f64,
    pub total_cost_tuition_only: f64,

    pub estimated_annual_earnings: f64,
    pub baseline_annual_earnings: f64,
    pub annual_earnings_premium: f64,
    pub lifetime_earnings_premium: f64,

    pub net_roi: f64,
    pub net_roi_tuition_only: f64,
    pub net_roi_all_expenses: f64,

    pub roi_percentage: f64,
    pub roi_percentage_tuition_only: f64,
    pub roi_percentage_all_expenses: f64,

    pub payback_years: Payback,
    pub payback_years_tuition_only: Payback,
    pub payback_years_all_expenses: Payback,

    /// Grants and scholarships over the whole course of study
    pub total_gift_aid: f64,
    /// `max(0, all-expenses cost - gift aid)`
    pub net_cost_after_gift_aid: f64,
    pub net_roi_after_gift_aid: f64,
    pub payback_years_after_gift_aid: Payback,

    pub average_annual_return: f64,
    pub average_annual_return_percentage: f64,
}

fn roi_percentage(net_roi: f64, total_cost: f64) -> f64 {
    if total_cost > 0.0 {
        net_roi / total_cost * 100.0
    } else {
        0.0
    }
}

/// Calculate ROI for a program of study
pub fn calculate_roi(inputs: &RoiInputs) -> Result<RoiResult> {
    inputs.validate()?;

    let years = inputs.years_of_study as f64;
    let total_tuition_fees = (inputs.annual_tuition + inputs.annual_fees) * years;
    let total_room_board = inputs.annual_room_board.unwrap_or(0.0) * years;
    let total_books_supplies = inputs.annual_books_supplies.unwrap_or(0.0) * years;

    let mut total_cost = total_tuition_fees;
    if inputs.include_room_board {
        total_cost += total_room_board;
    }
    if inputs.include_books_supplies {
        total_cost += total_books_supplies;
    }
    let total_cost_with_all_expenses = total_tuition_fees + total_room_board + total_books_supplies;
    let total_cost_tuition_only = total_tuition_fees;

    // Not clamped: a negative premium is a valid (poor) outcome
    let annual_earnings_premium = inputs.median_earnings_10yr - inputs.baseline_earnings;
    let career_years = inputs.career_years as f64;
    let lifetime_earnings_premium = annual_earnings_premium * career_years;

    let net_roi = lifetime_earnings_premium - total_cost;
    let net_roi_tuition_only = lifetime_earnings_premium - total_cost_tuition_only;
    let net_roi_all_expenses = lifetime_earnings_premium - total_cost_with_all_expenses;

    let roi_pct = roi_percentage(net_roi, total_cost);

    let total_gift_aid = (inputs.annual_grants + inputs.annual_scholarships) * years;
    let net_cost_after_gift_aid = (total_cost_with_all_expenses - total_gift_aid).max(0.0);

    Ok(RoiResult {
        total_tuition_fees,
        total_room_board,
        total_books_supplies,
        total_cost,
        total_cost_with_all_expenses,
        total_cost_tuition_only,
        estimated_annual_earnings: inputs.median_earnings_10yr,
        baseline_annual_earnings: inputs.baseline_earnings,
        annual_earnings_premium,
        lifetime_earnings_premium,
        net_roi,
        net_roi_tuition_only,
        net_roi_all_expenses,
        roi_percentage: roi_pct,
        roi_percentage_tuition_only: roi_percentage(net_roi_tuition_only, total_cost_tuition_only),
        roi_percentage_all_expenses: roi_percentage(
            net_roi_all_expenses,
            total_cost_with_all_expenses,
        ),
        payback_years: Payback::from_cost(total_cost, annual_earnings_premium),
        payback_years_tuition_only: Payback::from_cost(
            total_cost_tuition_only,
            annual_earnings_premium,
        ),
        payback_years_all_expenses: Payback::from_cost(
            total_cost_with_all_expenses,
            annual_earnings_premium,
        ),
        total_gift_aid,
        net_cost_after_gift_aid,
        net_roi_after_gift_aid: lifetime_earnings_premium - net_cost_after_gift_aid,
        payback_years_after_gift_aid: Payback::from_cost(
            net_cost_after_gift_aid,
            annual_earnings_premium,
        ),
        average_annual_return: net_roi / career_years,
        average_annual_return_percentage: roi_pct / career_years,
    })
}
