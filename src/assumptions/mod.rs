//! Calculation assumptions: tax brackets, allowances, tier bands and growth rates
//!
//! Every constant the calculators use lives here and is passed in explicitly,
//! so tests and callers can override any of them.

mod affordability;
mod efc;
mod rates;
pub mod loader;

pub use affordability::{AffordabilityThresholds, TierBands, PUBLIC_RATIO_OFFSET};
pub use efc::{AssetProtectionBand, ContributionBracket, EfcAssumptions, TaxAllowanceRates};
pub use loader::LoadedAssumptions;
pub use rates::{
    DebtAssumptions, LoanAssumptions, RoiDefaults, TrendAssumptions, DEFAULT_BASELINE_EARNINGS,
    DEFAULT_CAREER_YEARS,
};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Container for all calculation assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Assumptions {
    pub efc: EfcAssumptions,
    pub affordability: AffordabilityThresholds,
    pub roi: RoiDefaults,
    pub loan: LoanAssumptions,
    pub debt: DebtAssumptions,
    pub trend: TrendAssumptions,
}

impl Assumptions {
    /// Compiled-in defaults (simplified federal methodology, 2024-25 tables)
    pub fn default_federal() -> Self {
        Self::default()
    }

    /// Load table overrides from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load table overrides from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let loaded = LoadedAssumptions::load_from(path)?;
        let mut assumptions = Self::default_federal();

        if let Some(brackets) = loaded.income_brackets {
            assumptions.efc.income_brackets = brackets;
        }
        if let Some(bands) = loaded.tier_bands {
            assumptions.affordability = bands;
        }

        Ok(assumptions)
    }

    /// Parse a complete assumption set from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip_preserves_overrides() {
        let mut custom = Assumptions::default_federal();
        custom.trend.salary_growth_rate = 0.05;
        custom.efc.parent_asset_rate = 0.056;

        let json = serde_json::to_string(&custom).unwrap();
        let parsed = Assumptions::from_json_str(&json).unwrap();
        assert_eq!(parsed, custom);
    }

    #[test]
    fn test_from_csv_path_matches_defaults() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(loader::DEFAULT_ASSUMPTIONS_PATH);
        let loaded = Assumptions::from_csv_path(&dir).unwrap();
        assert_eq!(loaded, Assumptions::default_federal());
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Assumptions::from_json_str("{\"efc\": 3}").is_err());
    }
}
