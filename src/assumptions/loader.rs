//! CSV-based assumption loader
//!
//! Loads table overrides from CSV files in data/assumptions/. Files that are
//! absent leave the compiled-in defaults in place.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::affordability::{AffordabilityThresholds, TierBands};
use super::efc::ContributionBracket;
use crate::error::{CalcError, Result};

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

pub const INCOME_BRACKETS_FILE: &str = "efc_income_brackets.csv";
pub const TIER_BANDS_FILE: &str = "affordability_tiers.csv";

#[derive(Debug, Deserialize)]
struct BracketRow {
    upper: Option<f64>,
    base: f64,
    rate: f64,
}

#[derive(Debug, Deserialize)]
struct TierRow {
    band: String,
    affordable: f64,
    stretch: f64,
    reach: f64,
}

/// Load the progressive contribution schedule
/// Columns: upper,base,rate (empty upper = unbounded top band)
pub fn load_income_brackets_from_reader<R: Read>(reader: R) -> Result<Vec<ContributionBracket>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut brackets = Vec::new();

    for result in csv_reader.deserialize() {
        let row: BracketRow = result?;
        if !(0.0..=1.0).contains(&row.rate) {
            return Err(CalcError::invalid(
                "income_brackets.rate",
                format!("rate {} outside [0, 1]", row.rate),
            ));
        }
        brackets.push(ContributionBracket {
            upper: row.upper,
            base: row.base,
            rate: row.rate,
        });
    }

    if brackets.is_empty() {
        return Err(CalcError::invalid("income_brackets", "schedule has no rows"));
    }

    // Bounded uppers must increase; only the final band may be unbounded
    let mut previous = f64::NEG_INFINITY;
    for (idx, bracket) in brackets.iter().enumerate() {
        match bracket.upper {
            Some(upper) if upper > previous => previous = upper,
            Some(_) => {
                return Err(CalcError::invalid("income_brackets.upper", "uppers must increase"));
            }
            None if idx + 1 == brackets.len() => {}
            None => {
                return Err(CalcError::invalid(
                    "income_brackets.upper",
                    "only the last band may be unbounded",
                ));
            }
        }
    }

    Ok(brackets)
}

/// Load tier bands, one row per band set
/// Columns: band,affordable,stretch,reach where band is one of
/// private_ratio, public_ratio, private_zero_efc, public_zero_efc
pub fn load_tier_bands_from_reader<R: Read>(
    reader: R,
    base: &AffordabilityThresholds,
) -> Result<AffordabilityThresholds> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut thresholds = base.clone();

    for result in csv_reader.deserialize() {
        let row: TierRow = result?;
        let bands = TierBands {
            affordable: row.affordable,
            stretch: row.stretch,
            reach: row.reach,
        };
        if !bands.is_ordered() {
            return Err(CalcError::invalid(
                "affordability_tiers",
                format!("bands for `{}` must be non-negative and ascending", row.band),
            ));
        }
        match row.band.as_str() {
            "private_ratio" => thresholds.private_ratio = bands,
            "public_ratio" => thresholds.public_ratio = bands,
            "private_zero_efc" => thresholds.private_zero_efc = bands,
            "public_zero_efc" => thresholds.public_zero_efc = bands,
            other => {
                return Err(CalcError::invalid(
                    "affordability_tiers.band",
                    format!("unknown band set: {}", other),
                ));
            }
        }
    }

    Ok(thresholds)
}

fn open_optional(path: &Path, name: &str) -> Result<Option<File>> {
    let full = path.join(name);
    if !full.exists() {
        log::debug!("{} not found, using compiled-in defaults", full.display());
        return Ok(None);
    }
    Ok(Some(File::open(full)?))
}

/// Table overrides read from an assumptions directory
#[derive(Debug, Clone, Default)]
pub struct LoadedAssumptions {
    pub income_brackets: Option<Vec<ContributionBracket>>,
    pub tier_bands: Option<AffordabilityThresholds>,
}

impl LoadedAssumptions {
    /// Load all overrides from the default path
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load all overrides from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let income_brackets = match open_optional(path, INCOME_BRACKETS_FILE)? {
            Some(file) => Some(load_income_brackets_from_reader(file)?),
            None => None,
        };
        let tier_bands = match open_optional(path, TIER_BANDS_FILE)? {
            Some(file) => Some(load_tier_bands_from_reader(
                file,
                &AffordabilityThresholds::default(),
            )?),
            None => None,
        };

        Ok(Self {
            income_brackets,
            tier_bands,
        })
    }
}
