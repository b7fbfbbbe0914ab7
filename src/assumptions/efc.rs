//! Expected Family Contribution tables
//!
//! A simplified approximation of the federal methodology. These numbers are
//! NOT a certified financial-aid calculation; they only have to be stable and
//! documented so results are reproducible.

use serde::{Deserialize, Serialize};

/// One band of the progressive contribution schedule
///
/// Applies to available income up to and including `upper`
/// (`None` = unbounded). Contribution = `base + (income - lower) * rate`
/// where `lower` is the previous band's `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionBracket {
    pub upper: Option<f64>,
    pub base: f64,
    pub rate: f64,
}

/// Federal income tax allowance, three bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxAllowanceRates {
    pub low_rate: f64,
    pub mid_base: f64,
    pub mid_rate: f64,
    pub high_base: f64,
    pub high_rate: f64,
}

/// Asset protection allowance for one age band of the older parent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetProtectionBand {
    /// Band applies while parent age is below this value (`None` = no limit)
    pub below_age: Option<u32>,
    pub two_parents: f64,
    pub one_parent: f64,
}

/// All constants used by the EFC approximation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfcAssumptions {
    // Federal tax allowance
    pub tax_low_ceiling: f64,
    pub tax_mid_ceiling: f64,
    pub single_parent_tax: TaxAllowanceRates,
    pub two_parent_tax: TaxAllowanceRates,

    // State tax allowance
    pub high_tax_states: Vec<String>,
    pub low_tax_states: Vec<String>,
    pub high_state_tax_rate: f64,
    pub low_state_tax_rate: f64,
    pub default_state_tax_rate: f64,

    // FICA
    pub social_security_wage_base: f64,
    pub fica_rate: f64,

    // Income protection allowance
    pub base_income_protection: f64,
    pub single_parent_adjustment: f64,
    pub per_extra_dependent: f64,
    pub per_additional_in_college: f64,
    /// Household size the base allowance is calibrated for
    pub reference_dependents: u32,

    // Employment expense allowance
    pub employment_allowance_rate: f64,
    pub employment_allowance_cap: f64,

    /// Progressive schedule applied to parent available income
    pub income_brackets: Vec<ContributionBracket>,

    // Parent assets
    pub asset_protection: Vec<AssetProtectionBand>,
    pub parent_asset_rate: f64,
    pub default_parent_age: u32,

    // Student
    pub student_income_protection: f64,
    pub student_income_rate: f64,
    pub student_asset_rate: f64,
}

impl Default for EfcAssumptions {
    fn default() -> Self {
        Self {
            tax_low_ceiling: 15_000.0,
            tax_mid_ceiling: 35_000.0,
            single_parent_tax: TaxAllowanceRates {
                low_rate: 0.01,
                mid_base: 150.0,
                mid_rate: 0.08,
                high_base: 1_750.0,
                high_rate: 0.22,
            },
            two_parent_tax: TaxAllowanceRates {
                low_rate: 0.04,
                mid_base: 600.0,
                mid_rate: 0.10,
                high_base: 2_600.0,
                high_rate: 0.25,
            },
            high_tax_states: ["CA", "NY", "NJ", "CT", "MA", "OR", "MN", "VT"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            low_tax_states: ["TX", "FL", "WY", "SD", "WA", "TN", "NV", "AK"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            high_state_tax_rate: 0.07,
            low_state_tax_rate: 0.02,
            default_state_tax_rate: 0.05,
            social_security_wage_base: 160_200.0,
            fica_rate: 0.0765, // 6.2% SS + 1.45% Medicare
            base_income_protection: 30_500.0,
            single_parent_adjustment: -6_000.0,
            per_extra_dependent: 7_200.0,
            per_additional_in_college: 4_500.0,
            reference_dependents: 2,
            employment_allowance_rate: 0.35,
            employment_allowance_cap: 4_000.0,
            income_brackets: default_income_brackets(),
            asset_protection: vec![
                AssetProtectionBand {
                    below_age: Some(45),
                    two_parents: 0.0,
                    one_parent: 0.0,
                },
                AssetProtectionBand {
                    below_age: Some(50),
                    two_parents: 10_000.0,
                    one_parent: 5_000.0,
                },
                AssetProtectionBand {
                    below_age: Some(55),
                    two_parents: 20_000.0,
                    one_parent: 10_000.0,
                },
                AssetProtectionBand {
                    below_age: Some(60),
                    two_parents: 35_000.0,
                    one_parent: 17_500.0,
                },
                AssetProtectionBand {
                    below_age: Some(65),
                    two_parents: 50_000.0,
                    one_parent: 25_000.0,
                },
                AssetProtectionBand {
                    below_age: None,
                    two_parents: 65_000.0,
                    one_parent: 32_500.0,
                },
            ],
            parent_asset_rate: 0.12,
            default_parent_age: 50,
            student_income_protection: 7_600.0,
            student_income_rate: 0.50,
            student_asset_rate: 0.20,
        }
    }
}

/// Progressive schedule, 22% to 47%
pub fn default_income_brackets() -> Vec<ContributionBracket> {
    vec![
        ContributionBracket { upper: Some(3_409.0), base: 0.0, rate: 0.22 },
        ContributionBracket { upper: Some(6_802.0), base: 750.0, rate: 0.25 },
        ContributionBracket { upper: Some(10_212.0), base: 1_598.0, rate: 0.29 },
        ContributionBracket { upper: Some(13_620.0), base: 2_587.0, rate: 0.34 },
        ContributionBracket { upper: Some(17_029.0), base: 3_745.0, rate: 0.40 },
        ContributionBracket { upper: None, base: 5_109.0, rate: 0.47 },
    ]
}

impl EfcAssumptions {
    /// Federal tax allowance for the household
    pub fn federal_tax_allowance(&self, income: f64, number_of_parents: u8) -> f64 {
        let rates = if number_of_parents == 1 {
            &self.single_parent_tax
        } else {
            &self.two_parent_tax
        };

        if income <= self.tax_low_ceiling {
            income * rates.low_rate
        } else if income <= self.tax_mid_ceiling {
            rates.mid_base + (income - self.tax_low_ceiling) * rates.mid_rate
        } else {
            rates.high_base + (income - self.tax_mid_ceiling) * rates.high_rate
        }
    }

    /// State tax allowance by two-letter state code
    pub fn state_tax_allowance(&self, income: f64, state: Option<&str>) -> f64 {
        let rate = match state.map(|s| s.trim().to_ascii_uppercase()) {
            Some(code) if self.high_tax_states.iter().any(|s| *s == code) => {
                self.high_state_tax_rate
            }
            Some(code) if self.low_tax_states.iter().any(|s| *s == code) => {
                self.low_state_tax_rate
            }
            _ => self.default_state_tax_rate,
        };
        income * rate
    }

    pub fn fica_allowance(&self, income: f64) -> f64 {
        income.min(self.social_security_wage_base) * self.fica_rate
    }

    /// Living allowance scaled by household composition, floored at 0
    pub fn income_protection_allowance(
        &self,
        number_of_parents: u8,
        number_of_dependents: u32,
        number_in_college: u32,
    ) -> f64 {
        let parent_adj = if number_of_parents == 1 {
            self.single_parent_adjustment
        } else {
            0.0
        };
        let extra_dependents = number_of_dependents as f64 - self.reference_dependents as f64;
        let dependent_adj = extra_dependents * self.per_extra_dependent;
        let college_adj = (number_in_college as f64 - 1.0) * self.per_additional_in_college;

        (self.base_income_protection + parent_adj + dependent_adj - college_adj).max(0.0)
    }

    pub fn employment_allowance(&self, income: f64) -> f64 {
        (income * self.employment_allowance_rate).min(self.employment_allowance_cap)
    }

    /// Contribution from (already floored) available income
    pub fn income_contribution(&self, available_income: f64) -> f64 {
        let mut lower = 0.0;
        for bracket in &self.income_brackets {
            match bracket.upper {
                Some(upper) if available_income > upper => lower = upper,
                _ => return bracket.base + (available_income - lower) * bracket.rate,
            }
        }
        // Schedule without an unbounded top band: extend the last one
        match self.income_brackets.last() {
            Some(last) => {
                let prev = self
                    .income_brackets
                    .iter()
                    .rev()
                    .nth(1)
                    .and_then(|b| b.upper)
                    .unwrap_or(0.0);
                last.base + (available_income - prev) * last.rate
            }
            None => 0.0,
        }
    }

    pub fn asset_protection_allowance(&self, parent_age: u32, number_of_parents: u8) -> f64 {
        self.asset_protection
            .iter()
            .find(|band| band.below_age.map_or(true, |limit| parent_age < limit))
            .map(|band| {
                if number_of_parents == 2 {
                    band.two_parents
                } else {
                    band.one_parent
                }
            })
            .unwrap_or(0.0)
    }
}
