//! Scenario runner for household and institution calculations
//!
//! Pre-loads assumptions once, then runs any number of EFC, affordability,
//! ROI, loan and trend calculations against them without re-reading files.

use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::affordability::{
    assess_affordability, calculate_efc, estimate_debt_burden, AffordabilityAssessment,
    DebtBurden, EfcResult, FinancialProfile,
};
use crate::error::Result;
use crate::institution::{Institution, InstitutionType};
use crate::loan::{amortization_schedule, amortize, AmortizationEntry, LoanInputs, LoanResult};
use crate::roi::{calculate_roi, net_present_value, RoiInputs, RoiResult};
use crate::trend::{
    predict_trend, project_trend, summarize_trends, CategoryTrend, TrendAnchor, TrendPoint,
};
use crate::Assumptions;

/// ROI for one institution in a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionRoi {
    pub unit_id: u32,
    pub name: String,
    pub institution_type: InstitutionType,
    pub annual_cost: f64,
    pub roi: RoiResult,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
/// let efc = runner.efc(&profile)?;
/// for institution in &institutions {
///     let assessment = runner.assess_institution(efc.total_efc, institution, true)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with compiled-in assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default_federal(),
        }
    }

    /// Create runner by loading assumption overrides from CSV files
    pub fn from_csv() -> Result<Self> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv()?,
        })
    }

    /// Create runner from a specific assumptions directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self {
            base_assumptions: Assumptions::from_csv_path(path)?,
        })
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    pub fn efc(&self, profile: &FinancialProfile) -> Result<EfcResult> {
        calculate_efc(profile, &self.base_assumptions.efc)
    }

    pub fn affordability(
        &self,
        efc: f64,
        institution_cost: f64,
        institution_type: InstitutionType,
    ) -> Result<AffordabilityAssessment> {
        assess_affordability(
            efc,
            institution_cost,
            institution_type,
            &self.base_assumptions.affordability,
        )
    }

    /// Assess an institution's annual sticker cost (tuition, fees, room & board)
    pub fn assess_institution(
        &self,
        efc: f64,
        institution: &Institution,
        in_state: bool,
    ) -> Result<AffordabilityAssessment> {
        self.affordability(
            efc,
            institution.annual_cost(in_state),
            institution.institution_type,
        )
    }

    /// Debt burden for a yearly cost before EFC (not the post-EFC net price)
    pub fn debt_burden(&self, efc: f64, annual_cost: f64) -> Result<DebtBurden> {
        estimate_debt_burden(
            efc,
            annual_cost,
            &self.base_assumptions.debt,
            &self.base_assumptions.loan,
        )
    }

    pub fn roi(&self, inputs: &RoiInputs) -> Result<RoiResult> {
        calculate_roi(inputs)
    }

    /// NPV at the configured discount rate
    pub fn npv(&self, inputs: &RoiInputs) -> Result<f64> {
        net_present_value(inputs, self.base_assumptions.roi.discount_rate)
    }

    pub fn loan(&self, inputs: &LoanInputs) -> Result<LoanResult> {
        amortize(inputs, &self.base_assumptions.loan)
    }

    pub fn loan_schedule(&self, inputs: &LoanInputs) -> Result<Vec<AmortizationEntry>> {
        amortization_schedule(inputs, &self.base_assumptions.loan)
    }

    /// Backward projection at the configured inflation and growth rates
    pub fn trend(&self, anchor: &TrendAnchor, years_back: u32) -> Result<Vec<TrendPoint>> {
        let trend = &self.base_assumptions.trend;
        project_trend(
            anchor,
            years_back,
            trend.cost_inflation_rate,
            trend.salary_growth_rate,
            trend,
        )
    }

    pub fn predict(&self, history: &[TrendPoint], years_ahead: u32) -> Result<Vec<TrendPoint>> {
        predict_trend(history, years_ahead, &self.base_assumptions.trend)
    }

    pub fn trend_summary(&self, history: &[TrendPoint]) -> Vec<CategoryTrend> {
        summarize_trends(history)
    }

    /// ROI for every institution with usable data, best net ROI first
    ///
    /// Institutions missing tuition or earnings are skipped.
    pub fn compare(
        &self,
        institutions: &[Institution],
        in_state: bool,
        include_room_board: bool,
        include_books_supplies: bool,
    ) -> Vec<InstitutionRoi> {
        let defaults = &self.base_assumptions.roi;

        let mut rows: Vec<InstitutionRoi> = institutions
            .par_iter()
            .filter_map(|institution| {
                let inputs = match institution.roi_inputs(
                    defaults,
                    in_state,
                    include_room_board,
                    include_books_supplies,
                ) {
                    Some(inputs) => inputs,
                    None => {
                        log::warn!(
                            "skipping {} ({}): missing tuition or earnings",
                            institution.unit_id,
                            institution.name
                        );
                        return None;
                    }
                };
                match calculate_roi(&inputs) {
                    Ok(roi) => Some(InstitutionRoi {
                        unit_id: institution.unit_id,
                        name: institution.name.clone(),
                        institution_type: institution.institution_type,
                        annual_cost: institution.annual_cost(in_state),
                        roi,
                    }),
                    Err(e) => {
                        log::warn!(
                            "skipping {} ({}): {}",
                            institution.unit_id,
                            institution.name,
                            e
                        );
                        None
                    }
                }
            })
            .collect();

        rows.sort_by(|a, b| b.roi.net_roi.total_cmp(&a.roi.net_roi));
        rows
    }

    /// Run many ROI calculations in parallel, preserving input order
    pub fn run_roi_batch(&self, inputs: &[RoiInputs]) -> Vec<Result<RoiResult>> {
        inputs.par_iter().map(calculate_roi).collect()
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Mutable access for per-scenario overrides
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn institution(unit_id: u32, tuition: f64, earnings: Option<f64>) -> Institution {
        Institution {
            unit_id,
            name: format!("College {}", unit_id),
            state: None,
            institution_type: InstitutionType::PrivateNonprofit,
            tuition_in_state: Some(tuition),
            tuition_out_state: Some(tuition),
            fees: Some(1_000.0),
            room_board: Some(10_000.0),
            books_supplies: Some(1_000.0),
            median_earnings_10yr: earnings,
        }
    }

    #[test]
    fn test_compare_sorted_by_net_roi() {
        let runner = ScenarioRunner::new();
        let institutions = vec![
            institution(1, 40_000.0, Some(60_000.0)),
            institution(2, 10_000.0, Some(70_000.0)),
            institution(3, 20_000.0, None),
            institution(4, 15_000.0, Some(35_000.0)),
        ];

        let rows = runner.compare(&institutions, true, true, false);
        let ids: Vec<u32> = rows.iter().map(|r| r.unit_id).collect();
        assert_eq!(ids, vec![2, 1, 4]);
        assert!(rows[2].roi.net_roi < 0.0);
    }

    #[test]
    fn test_batch_preserves_order() {
        let runner = ScenarioRunner::new();
        let defaults = &runner.assumptions().roi;
        let inputs: Vec<RoiInputs> = [10_000.0, 20_000.0, 30_000.0]
            .iter()
            .filter_map(|&t| {
                institution(1, t, Some(60_000.0)).roi_inputs(defaults, true, false, false)
            })
            .collect();

        let results = runner.run_roi_batch(&inputs);
        assert_eq!(results.len(), 3);
        let costs: Vec<f64> = results.iter().map(|r| r.as_ref().unwrap().total_cost).collect();
        assert_eq!(costs, vec![44_000.0, 84_000.0, 124_000.0]);
    }

    #[test]
    fn test_overridden_assumptions_flow_through() {
        let mut runner = ScenarioRunner::new();
        runner.assumptions_mut().trend.cost_inflation_rate = 0.0;
        let anchor = TrendAnchor {
            year: 2024,
            avg_cost: 30_000.0,
            base_salary: 50_000.0,
            data_points: 0,
        };
        let points = runner.trend(&anchor, 3).unwrap();
        assert!(points.iter().all(|p| p.avg_cost == 30_000.0));
    }

    #[test]
    fn test_household_flow() {
        let runner = ScenarioRunner::new();
        let efc = runner.efc(&FinancialProfile::new(0.0, 80_000.0, 20_000.0)).unwrap();
        let college = institution(9, 30_000.0, Some(55_000.0));
        let assessment = runner.assess_institution(efc.total_efc, &college, true).unwrap();
        // 41,000 sticker against a 7,224 EFC
        assert_eq!(assessment.gap_amount, 41_000.0 - 7_224.0);
        let debt = runner.debt_burden(efc.total_efc, college.annual_cost(true)).unwrap();
        assert!(!debt.is_manageable);
    }

    #[test]
    fn test_debt_burden_subtracts_efc_once() {
        let runner = ScenarioRunner::new();
        let efc = runner.efc(&FinancialProfile::new(0.0, 80_000.0, 20_000.0)).unwrap();
        let college = institution(9, 30_000.0, Some(55_000.0));
        let sticker = college.annual_cost(true);

        let debt = runner.debt_burden(efc.total_efc, sticker).unwrap();
        // (41,000 - 7,224 EFC - 3,000 work-study) * 4 years
        assert_eq!(debt.total_debt, 123_104.0);

        let assessment = runner.assess_institution(efc.total_efc, &college, true).unwrap();
        let from_net_price = runner
            .debt_burden(efc.total_efc, assessment.estimated_net_price)
            .unwrap();
        assert!(from_net_price.total_debt < debt.total_debt);
    }
}
