//! ROI, loan and trend defaults

use serde::{Deserialize, Serialize};

/// Approximate high school graduate earnings used as the ROI baseline
pub const DEFAULT_BASELINE_EARNINGS: f64 = 40_000.0;

/// Default career length for lifetime earnings
pub const DEFAULT_CAREER_YEARS: u32 = 30;

/// Defaults applied when building ROI inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiDefaults {
    pub baseline_earnings: f64,
    pub career_years: u32,
    pub years_of_study: u32,
    /// Annual rate for the discounted (NPV) view
    pub discount_rate: f64,
}

impl Default for RoiDefaults {
    fn default() -> Self {
        Self {
            baseline_earnings: DEFAULT_BASELINE_EARNINGS,
            career_years: DEFAULT_CAREER_YEARS,
            years_of_study: 4,
            discount_rate: 0.03,
        }
    }
}

/// Student loan plan parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanAssumptions {
    /// Graduated plan: payment grows by this fraction of the standard payment each year
    pub graduated_step_rate: f64,
    pub standard_term_years: u32,
    pub extended_term_years: u32,
    /// Federal undergraduate rate used for debt burden estimates
    pub default_annual_rate: f64,
}

impl Default for LoanAssumptions {
    fn default() -> Self {
        Self {
            graduated_step_rate: 0.035, // 3.5%/yr, i.e. 7% every 2 years
            standard_term_years: 10,
            extended_term_years: 25,
            default_annual_rate: 0.055,
        }
    }
}

/// Rule-of-thumb parameters for debt burden
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtAssumptions {
    pub work_study_income: f64,
    pub years_of_borrowing: u32,
    pub starting_salary: f64,
    /// Total debt must not exceed this share of starting salary (percent)
    pub max_debt_to_income_pct: f64,
    /// Monthly payment must not exceed this share of monthly salary
    pub max_payment_share: f64,
}

impl Default for DebtAssumptions {
    fn default() -> Self {
        Self {
            work_study_income: 3_000.0,
            years_of_borrowing: 4,
            starting_salary: 45_000.0,
            max_debt_to_income_pct: 100.0,
            max_payment_share: 0.10,
        }
    }
}

/// Growth rates for historical extrapolation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAssumptions {
    pub cost_inflation_rate: f64,
    pub salary_growth_rate: f64,
    pub base_salary: f64,
    /// ROI heuristic: salary multiple minus cost multiple
    pub roi_salary_years: f64,
    pub roi_cost_years: f64,
    /// Observed points required before predicting forward
    pub min_points_for_prediction: usize,
}

impl Default for TrendAssumptions {
    fn default() -> Self {
        Self {
            cost_inflation_rate: 0.04,
            salary_growth_rate: 0.03,
            base_salary: 55_000.0,
            roi_salary_years: 10.0,
            roi_cost_years: 4.0,
            min_points_for_prediction: 3,
        }
    }
}
