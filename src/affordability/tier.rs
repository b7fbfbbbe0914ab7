//! Affordability tiering of an institution's cost against EFC

use serde::{Deserialize, Serialize};

use crate::assumptions::{AffordabilityThresholds, TierBands};
use crate::error::{require_non_negative, Result};
use crate::institution::InstitutionType;

/// Ordered from most to least affordable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AffordabilityTier {
    Affordable,
    Stretch,
    Reach,
    Unaffordable,
}

impl AffordabilityTier {
    fn classify(value: f64, bands: &TierBands) -> Self {
        if value <= bands.affordable {
            AffordabilityTier::Affordable
        } else if value <= bands.stretch {
            AffordabilityTier::Stretch
        } else if value <= bands.reach {
            AffordabilityTier::Reach
        } else {
            AffordabilityTier::Unaffordable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AffordabilityTier::Affordable => "Affordable",
            AffordabilityTier::Stretch => "Stretch",
            AffordabilityTier::Reach => "Financial Reach",
            AffordabilityTier::Unaffordable => "Unaffordable",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AffordabilityTier::Affordable => {
                "Manageable cost aligned with your financial capacity"
            }
            AffordabilityTier::Stretch => "Requires loans or additional aid to bridge gap",
            AffordabilityTier::Reach => {
                "Significant financial gap - explore additional aid options"
            }
            AffordabilityTier::Unaffordable => "Cost far exceeds expected family contribution",
        }
    }
}

/// Result of comparing an institution's cost with a household's EFC
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub estimated_efc: f64,
    pub affordability_tier: AffordabilityTier,
    /// `max(0, cost - efc)`
    pub estimated_net_price: f64,
    /// `max(0, cost - efc)`, surfaced separately for display
    pub gap_amount: f64,
    pub max_affordable_cost: f64,
    /// `cost / efc`; `None` when EFC is zero
    pub cost_to_efc_ratio: Option<f64>,
}

/// Classify an institution's annual cost against a household's EFC
///
/// With a positive EFC the tier comes from `cost / efc`; with zero EFC it
/// comes from the absolute cost. Public institutions use the wider bands.
pub fn assess_affordability(
    efc: f64,
    institution_cost: f64,
    institution_type: InstitutionType,
    thresholds: &AffordabilityThresholds,
) -> Result<AffordabilityAssessment> {
    require_non_negative("efc", efc)?;
    require_non_negative("institution_cost", institution_cost)?;

    let public = institution_type.is_public();
    let gap = (institution_cost - efc).max(0.0);

    let (tier, ratio) = if efc > 0.0 {
        let ratio = institution_cost / efc;
        let bands = if public {
            &thresholds.public_ratio
        } else {
            &thresholds.private_ratio
        };
        (AffordabilityTier::classify(ratio, bands), Some(ratio))
    } else {
        let bands = if public {
            &thresholds.public_zero_efc
        } else {
            &thresholds.private_zero_efc
        };
        (AffordabilityTier::classify(institution_cost, bands), None)
    };

    Ok(AffordabilityAssessment {
        estimated_efc: efc,
        affordability_tier: tier,
        estimated_net_price: gap,
        gap_amount: gap,
        max_affordable_cost: efc * thresholds.stretch_multiplier,
        cost_to_efc_ratio: ratio,
    })
}
