//! Latest-year change per trend category

use serde::{Deserialize, Serialize};

use super::TrendPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendCategory {
    AverageSalary,
    AverageCost,
    AverageRoi,
}

impl TrendCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TrendCategory::AverageSalary => "Average Salary",
            TrendCategory::AverageCost => "Average Cost",
            TrendCategory::AverageRoi => "Average ROI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    fn of_change(change: f64) -> Self {
        if change > 0.0 {
            TrendDirection::Up
        } else if change < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrend {
    pub category: TrendCategory,
    pub current_value: f64,
    pub previous_value: f64,
    pub change: f64,
    /// Relative to `|previous_value|`; 0 when the previous value is 0
    pub change_percent: f64,
    pub direction: TrendDirection,
}

impl CategoryTrend {
    fn between(category: TrendCategory, previous: f64, current: f64) -> Self {
        let change = current - previous;
        let change_percent = if previous != 0.0 {
            change / previous.abs() * 100.0
        } else {
            0.0
        };
        Self {
            category,
            current_value: current,
            previous_value: previous,
            change,
            change_percent,
            direction: TrendDirection::of_change(change),
        }
    }
}

/// Compare the two most recent points of chronological history
///
/// Returns salary, cost and ROI trends in that order, or nothing with fewer
/// than two points.
pub fn summarize_trends(history: &[TrendPoint]) -> Vec<CategoryTrend> {
    let (previous, current) = match history {
        [.., previous, current] => (previous, current),
        _ => return Vec::new(),
    };

    vec![
        CategoryTrend::between(
            TrendCategory::AverageSalary,
            previous.avg_salary,
            current.avg_salary,
        ),
        CategoryTrend::between(TrendCategory::AverageCost, previous.avg_cost, current.avg_cost),
        CategoryTrend::between(TrendCategory::AverageRoi, previous.avg_roi, current.avg_roi),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn point(year: i32, salary: f64, cost: f64, roi: f64) -> TrendPoint {
        TrendPoint {
            year,
            avg_salary: salary,
            avg_cost: cost,
            avg_roi: roi,
            data_points: 0,
        }
    }

    #[test]
    fn test_latest_change() {
        let history = [
            point(2021, 50_000.0, 30_000.0, 100.0),
            point(2022, 52_000.0, 30_000.0, -200.0),
            point(2023, 54_600.0, 29_000.0, 100.0),
        ];
        let trends = summarize_trends(&history);
        assert_eq!(trends.len(), 3);

        let salary = &trends[0];
        assert_eq!(salary.category, TrendCategory::AverageSalary);
        assert_eq!(salary.change, 2_600.0);
        assert_abs_diff_eq!(salary.change_percent, 5.0, epsilon = 1e-9);
        assert_eq!(salary.direction, TrendDirection::Up);

        assert_eq!(trends[1].direction, TrendDirection::Down);

        // Negative previous ROI: percentage is taken against its magnitude
        let roi = &trends[2];
        assert_eq!(roi.change, 300.0);
        assert_abs_diff_eq!(roi.change_percent, 150.0, epsilon = 1e-9);
        assert_eq!(roi.direction, TrendDirection::Up);
    }

    #[test]
    fn test_zero_previous_value() {
        let history = [point(2022, 0.0, 100.0, 0.0), point(2023, 0.0, 100.0, 500.0)];
        let trends = summarize_trends(&history);
        assert_eq!(trends[0].direction, TrendDirection::Stable);
        assert_eq!(trends[2].change_percent, 0.0);
        assert!(trends.iter().all(|t| t.change_percent.is_finite()));
    }

    #[test]
    fn test_needs_two_points() {
        assert!(summarize_trends(&[]).is_empty());
        assert!(summarize_trends(&[point(2023, 1.0, 1.0, 1.0)]).is_empty());
    }
}
