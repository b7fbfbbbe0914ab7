//! Expected Family Contribution estimate
//!
//! A simplified approximation of the federal methodology, not a certified
//! financial-aid calculation. Intermediate amounts are floored at zero before
//! they feed the next step; caller-supplied negatives are rejected instead.

use serde::{Deserialize, Serialize};

use crate::assumptions::EfcAssumptions;
use crate::error::{require_non_negative, CalcError, Result};

fn default_true() -> bool {
    true
}

/// A household's aid-eligibility inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub student_income: f64,
    #[serde(default)]
    pub student_assets: f64,
    pub parent_income: f64,
    pub parent_assets: f64,

    /// 0, 1 or 2; zero means no parental contribution
    pub number_of_parents: u8,

    /// Household dependents, including the student
    pub number_of_dependents: u32,

    /// Family members enrolled simultaneously, including the student
    pub number_in_college: u32,

    #[serde(default = "default_true")]
    pub is_student_dependent: bool,

    /// Age of the older parent; drives asset protection
    #[serde(default)]
    pub parent_age: Option<u32>,

    /// Two-letter state code; drives the state tax allowance
    #[serde(default)]
    pub state_of_residence: Option<String>,
}

impl FinancialProfile {
    /// Dependent student with two parents and no other enrollees
    pub fn new(student_income: f64, parent_income: f64, parent_assets: f64) -> Self {
        Self {
            student_income,
            student_assets: 0.0,
            parent_income,
            parent_assets,
            number_of_parents: 2,
            number_of_dependents: 2,
            number_in_college: 1,
            is_student_dependent: true,
            parent_age: None,
            state_of_residence: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_non_negative("student_income", self.student_income)?;
        require_non_negative("student_assets", self.student_assets)?;
        require_non_negative("parent_income", self.parent_income)?;
        require_non_negative("parent_assets", self.parent_assets)?;

        if self.number_of_parents > 2 {
            return Err(CalcError::invalid(
                "number_of_parents",
                format!("must be 0, 1 or 2, got {}", self.number_of_parents),
            ));
        }
        if self.number_in_college == 0 {
            return Err(CalcError::invalid(
                "number_in_college",
                "must be >= 1 (the applicant counts as one)",
            ));
        }
        Ok(())
    }

    fn has_parent_contribution(&self) -> bool {
        self.is_student_dependent && self.number_of_parents > 0
    }
}

/// Intermediate amounts behind an EFC figure
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EfcBreakdown {
    pub parent_available_income: f64,
    pub parent_asset_contribution: f64,
    pub student_available_income: f64,
    pub student_asset_contribution: f64,
    pub adjusted_available_income: f64,
}

/// Output of the EFC estimate, in whole dollars
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfcResult {
    pub student_contribution: f64,
    pub parent_contribution: f64,
    pub total_efc: f64,
    pub breakdown: EfcBreakdown,
}

struct Contribution {
    contribution: f64,
    available_income: f64,
    asset_contribution: f64,
}

fn parent_contribution(profile: &FinancialProfile, efc: &EfcAssumptions) -> Contribution {
    let income = profile.parent_income;
    let parents = profile.number_of_parents;

    let total_allowances = efc.federal_tax_allowance(income, parents)
        + efc.state_tax_allowance(income, profile.state_of_residence.as_deref())
        + efc.fica_allowance(income)
        + efc.income_protection_allowance(
            parents,
            profile.number_of_dependents,
            profile.number_in_college,
        )
        + efc.employment_allowance(income);

    let available_income = (income - total_allowances).max(0.0);
    let income_contribution = efc.income_contribution(available_income);

    let parent_age = profile.parent_age.unwrap_or(efc.default_parent_age);
    let protected_assets = efc.asset_protection_allowance(parent_age, parents);
    let discretionary_net_worth = (profile.parent_assets - protected_assets).max(0.0);
    let asset_contribution = discretionary_net_worth * efc.parent_asset_rate;

    let adjusted = income_contribution + asset_contribution;

    Contribution {
        contribution: (adjusted / profile.number_in_college as f64).round(),
        available_income: available_income.round(),
        asset_contribution: asset_contribution.round(),
    }
}

fn student_contribution(profile: &FinancialProfile, efc: &EfcAssumptions) -> Contribution {
    let available_income = (profile.student_income - efc.student_income_protection).max(0.0);
    let income_contribution = available_income * efc.student_income_rate;
    let asset_contribution = profile.student_assets * efc.student_asset_rate;

    Contribution {
        contribution: (income_contribution + asset_contribution).round(),
        available_income: available_income.round(),
        asset_contribution: asset_contribution.round(),
    }
}

/// Estimate the Expected Family Contribution for one academic year
pub fn calculate_efc(profile: &FinancialProfile, efc: &EfcAssumptions) -> Result<EfcResult> {
    profile.validate()?;

    let parent = if profile.has_parent_contribution() {
        parent_contribution(profile, efc)
    } else {
        Contribution {
            contribution: 0.0,
            available_income: 0.0,
            asset_contribution: 0.0,
        }
    };
    let student = student_contribution(profile, efc);

    let total_efc = (parent.contribution + student.contribution).max(0.0).round();

    Ok(EfcResult {
        student_contribution: student.contribution,
        parent_contribution: parent.contribution,
        total_efc,
        breakdown: EfcBreakdown {
            parent_available_income: parent.available_income,
            parent_asset_contribution: parent.asset_contribution,
            student_available_income: student.available_income,
            student_asset_contribution: student.asset_contribution,
            adjusted_available_income: parent.available_income + parent.asset_contribution,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_profile() -> FinancialProfile {
        FinancialProfile {
            student_income: 0.0,
            student_assets: 0.0,
            parent_income: 80_000.0,
            parent_assets: 20_000.0,
            number_of_parents: 2,
            number_of_dependents: 2,
            number_in_college: 1,
            is_student_dependent: true,
            parent_age: None,
            state_of_residence: None,
        }
    }

    #[test]
    fn test_reference_household() {
        let result = calculate_efc(&reference_profile(), &EfcAssumptions::default()).unwrap();

        // Allowances: 13,850 fed + 4,000 state + 6,120 FICA + 30,500 IPA + 4,000 employment
        assert_eq!(result.breakdown.parent_available_income, 21_530.0);
        // Assets fully sheltered by the age-50 allowance
        assert_eq!(result.breakdown.parent_asset_contribution, 0.0);
        assert_eq!(result.parent_contribution, 7_224.0);
        assert_eq!(result.student_contribution, 0.0);
        assert_eq!(result.total_efc, 7_224.0);
    }

    #[test]
    fn test_student_contribution() {
        let mut profile = reference_profile();
        profile.parent_income = 0.0;
        profile.parent_assets = 0.0;
        profile.student_income = 12_000.0;
        profile.student_assets = 5_000.0;

        let result = calculate_efc(&profile, &EfcAssumptions::default()).unwrap();
        // 50% of (12,000 - 7,600) + 20% of 5,000
        assert_eq!(result.student_contribution, 3_200.0);
        assert_eq!(result.parent_contribution, 0.0);
        assert_eq!(result.total_efc, 3_200.0);
    }

    #[test]
    fn test_siblings_in_college_split_parent_share() {
        let mut one = reference_profile();
        one.parent_income = 150_000.0;
        let mut two = one.clone();
        two.number_in_college = 2;

        let efc = EfcAssumptions::default();
        let single = calculate_efc(&one, &efc).unwrap();
        let shared = calculate_efc(&two, &efc).unwrap();
        // Smaller protection allowance per household, but the result is split two ways
        assert!(shared.parent_contribution < single.parent_contribution);
        assert!(shared.parent_contribution * 2.0 > single.parent_contribution);
    }

    #[test]
    fn test_independent_student_has_no_parent_share() {
        let mut profile = reference_profile();
        profile.is_student_dependent = false;
        let result = calculate_efc(&profile, &EfcAssumptions::default()).unwrap();
        assert_eq!(result.parent_contribution, 0.0);

        profile.is_student_dependent = true;
        profile.number_of_parents = 0;
        let result = calculate_efc(&profile, &EfcAssumptions::default()).unwrap();
        assert_eq!(result.parent_contribution, 0.0);
    }

    #[test]
    fn test_low_income_floors_at_zero() {
        let mut profile = reference_profile();
        profile.parent_income = 20_000.0;
        profile.parent_assets = 0.0;
        let result = calculate_efc(&profile, &EfcAssumptions::default()).unwrap();
        assert_eq!(result.breakdown.parent_available_income, 0.0);
        assert_eq!(result.total_efc, 0.0);
    }

    #[test]
    fn test_negative_input_rejected() {
        let mut profile = reference_profile();
        profile.parent_assets = -1.0;
        let err = calculate_efc(&profile, &EfcAssumptions::default()).unwrap_err();
        assert_eq!(err.field(), Some("parent_assets"));
    }

    #[test]
    fn test_zero_in_college_rejected() {
        let mut profile = reference_profile();
        profile.number_in_college = 0;
        let err = calculate_efc(&profile, &EfcAssumptions::default()).unwrap_err();
        assert_eq!(err.field(), Some("number_in_college"));
    }

    #[test]
    fn test_three_parents_rejected() {
        let mut profile = reference_profile();
        profile.number_of_parents = 3;
        assert!(calculate_efc(&profile, &EfcAssumptions::default()).is_err());
    }

    #[test]
    fn test_efc_non_negative_across_grid() {
        let efc = EfcAssumptions::default();
        for parent_income in [0.0, 10_000.0, 45_000.0, 90_000.0, 250_000.0] {
            for parents in 0..=2u8 {
                for dependents in [0u32, 1, 3, 6] {
                    for in_college in [1u32, 2, 4] {
                        let profile = FinancialProfile {
                            number_of_parents: parents,
                            number_of_dependents: dependents,
                            number_in_college: in_college,
                            ..FinancialProfile::new(2_000.0, parent_income, 30_000.0)
                        };
                        let result = calculate_efc(&profile, &efc).unwrap();
                        assert!(result.total_efc >= 0.0);
                        assert!(result.parent_contribution >= 0.0);
                    }
                }
            }
        }
    }
}
