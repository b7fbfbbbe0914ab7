//! Backward and forward extrapolation of cost, salary and ROI by year
//!
//! Backward points are discounted with compound growth rates from a single
//! anchor year. Forward points extend observed history linearly by the average
//! year-over-year change. The two methods are deliberately different and are
//! not reconciled here.

use serde::{Deserialize, Serialize};

use crate::assumptions::TrendAssumptions;
use crate::error::{require_non_negative, require_positive_count, CalcError, Result};

/// The one observed year everything else is derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendAnchor {
    pub year: i32,
    pub avg_cost: f64,
    pub base_salary: f64,
    /// Institutions behind the anchor averages
    #[serde(default)]
    pub data_points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub avg_salary: f64,
    pub avg_cost: f64,
    pub avg_roi: f64,
    /// Zero for synthetic and predicted years
    pub data_points: u32,
}

/// Crude "10 years of salary minus 4 years of cost" heuristic
pub(crate) fn heuristic_roi(salary: f64, cost: f64, trend: &TrendAssumptions) -> f64 {
    salary * trend.roi_salary_years - cost * trend.roi_cost_years
}

fn require_growth_rate(field: &'static str, rate: f64) -> Result<()> {
    if !rate.is_finite() || rate <= -1.0 {
        return Err(CalcError::invalid(field, format!("must be > -1, got {}", rate)));
    }
    Ok(())
}

/// Project `years_back` points ending at the anchor year, oldest first
pub fn project_trend(
    anchor: &TrendAnchor,
    years_back: u32,
    cost_inflation_rate: f64,
    salary_growth_rate: f64,
    trend: &TrendAssumptions,
) -> Result<Vec<TrendPoint>> {
    require_positive_count("years_back", years_back)?;
    require_non_negative("avg_cost", anchor.avg_cost)?;
    require_non_negative("base_salary", anchor.base_salary)?;
    require_growth_rate("cost_inflation_rate", cost_inflation_rate)?;
    require_growth_rate("salary_growth_rate", salary_growth_rate)?;

    let points = (0..years_back)
        .rev()
        .map(|i| {
            let years_ago = i as i32;
            let avg_cost = anchor.avg_cost / (1.0 + cost_inflation_rate).powi(years_ago);
            let avg_salary = anchor.base_salary / (1.0 + salary_growth_rate).powi(years_ago);
            TrendPoint {
                year: anchor.year - years_ago,
                avg_salary,
                avg_cost,
                avg_roi: heuristic_roi(avg_salary, avg_cost, trend),
                data_points: if i == 0 { anchor.data_points } else { 0 },
            }
        })
        .collect();

    Ok(points)
}

/// Extend chronological history `years_ahead` years by its average yearly change
///
/// Returns an empty sequence when fewer than the configured minimum number of
/// points are available.
pub fn predict_trend(
    history: &[TrendPoint],
    years_ahead: u32,
    trend: &TrendAssumptions,
) -> Result<Vec<TrendPoint>> {
    if history.windows(2).any(|pair| pair[1].year <= pair[0].year) {
        return Err(CalcError::invalid(
            "history",
            "years must be strictly increasing (oldest first)",
        ));
    }
    let latest = match history.last() {
        Some(latest) if history.len() >= trend.min_points_for_prediction.max(2) => latest,
        _ => {
            log::debug!(
                "not predicting from {} points (need {})",
                history.len(),
                trend.min_points_for_prediction
            );
            return Ok(Vec::new());
        }
    };

    let intervals = (history.len() - 1) as f64;
    let (salary_delta, cost_delta) = history
        .windows(2)
        .fold((0.0, 0.0), |(salary, cost), pair| {
            (
                salary + pair[1].avg_salary - pair[0].avg_salary,
                cost + pair[1].avg_cost - pair[0].avg_cost,
            )
        });
    let avg_salary_change = salary_delta / intervals;
    let avg_cost_change = cost_delta / intervals;

    Ok((1..=years_ahead)
        .map(|k| {
            let steps = k as f64;
            let avg_salary = latest.avg_salary + avg_salary_change * steps;
            let avg_cost = latest.avg_cost + avg_cost_change * steps;
            TrendPoint {
                year: latest.year + k as i32,
                avg_salary,
                avg_cost,
                avg_roi: heuristic_roi(avg_salary, avg_cost, trend),
                data_points: 0,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn anchor() -> TrendAnchor {
        TrendAnchor {
            year: 2023,
            avg_cost: 40_000.0,
            base_salary: 60_000.0,
            data_points: 1_200,
        }
    }

    #[test]
    fn test_backward_projection_values() {
        let trend = TrendAssumptions::default();
        let points = project_trend(&anchor(), 5, 0.04, 0.03, &trend).unwrap();

        let years: Vec<i32> = points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2019, 2020, 2021, 2022, 2023]);

        assert_abs_diff_eq!(points[0].avg_cost, 34_192.17, epsilon = 0.01);
        assert_abs_diff_eq!(points[0].avg_salary, 53_309.22, epsilon = 0.01);
        assert_abs_diff_eq!(points[3].avg_cost, 38_461.54, epsilon = 0.01);
        assert_eq!(points[4].avg_cost, 40_000.0);
        assert_eq!(points[4].avg_salary, 60_000.0);
        assert_eq!(points[4].avg_roi, 600_000.0 - 160_000.0);
    }

    #[test]
    fn test_only_anchor_carries_data_points() {
        let points = project_trend(&anchor(), 3, 0.04, 0.03, &TrendAssumptions::default()).unwrap();
        assert_eq!(points[2].data_points, 1_200);
        assert!(points[..2].iter().all(|p| p.data_points == 0));
    }

    #[test]
    fn test_backward_projection_is_idempotent() {
        let trend = TrendAssumptions::default();
        let a = project_trend(&anchor(), 8, 0.04, 0.03, &trend).unwrap();
        let b = project_trend(&anchor(), 8, 0.04, 0.03, &trend).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_projection_inputs() {
        let trend = TrendAssumptions::default();
        let err = project_trend(&anchor(), 0, 0.04, 0.03, &trend).unwrap_err();
        assert_eq!(err.field(), Some("years_back"));
        let err = project_trend(&anchor(), 5, -1.0, 0.03, &trend).unwrap_err();
        assert_eq!(err.field(), Some("cost_inflation_rate"));
    }

    #[test]
    fn test_forward_prediction_is_linear() {
        let trend = TrendAssumptions::default();
        let history = project_trend(&anchor(), 5, 0.04, 0.03, &trend).unwrap();
        let predicted = predict_trend(&history, 3, &trend).unwrap();

        assert_eq!(predicted.len(), 3);
        assert_eq!(predicted[0].year, 2024);
        assert_eq!(predicted[2].year, 2026);

        // Average delta equals (last - first) / intervals
        let cost_step = (40_000.0 - history[0].avg_cost) / 4.0;
        assert_abs_diff_eq!(predicted[0].avg_cost, 40_000.0 + cost_step, epsilon = 1e-6);
        assert_abs_diff_eq!(predicted[2].avg_cost, 40_000.0 + 3.0 * cost_step, epsilon = 1e-6);
        assert_abs_diff_eq!(
            predicted[1].avg_cost - predicted[0].avg_cost,
            predicted[2].avg_cost - predicted[1].avg_cost,
            epsilon = 1e-6
        );
        assert!(predicted.iter().all(|p| p.data_points == 0));
    }

    #[test]
    fn test_prediction_needs_three_points() {
        let trend = TrendAssumptions::default();
        let history = project_trend(&anchor(), 2, 0.04, 0.03, &trend).unwrap();
        assert!(predict_trend(&history, 3, &trend).unwrap().is_empty());
        assert!(predict_trend(&[], 3, &trend).unwrap().is_empty());
    }

    #[test]
    fn test_unordered_history_rejected() {
        let trend = TrendAssumptions::default();
        let mut history = project_trend(&anchor(), 4, 0.04, 0.03, &trend).unwrap();
        history.reverse();
        let err = predict_trend(&history, 2, &trend).unwrap_err();
        assert_eq!(err.field(), Some("history"));
    }
}
