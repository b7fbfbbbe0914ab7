//! Affordability tier bands

use serde::{Deserialize, Serialize};

/// Extra ratio headroom public institutions get on every band
pub const PUBLIC_RATIO_OFFSET: f64 = 0.25;

/// Upper bounds (inclusive) for each tier; anything above `reach` is unaffordable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBands {
    pub affordable: f64,
    pub stretch: f64,
    pub reach: f64,
}

impl TierBands {
    pub fn offset(&self, by: f64) -> Self {
        Self {
            affordable: self.affordable + by,
            stretch: self.stretch + by,
            reach: self.reach + by,
        }
    }

    pub fn scaled(&self, by: f64) -> Self {
        Self {
            affordable: self.affordable * by,
            stretch: self.stretch * by,
            reach: self.reach * by,
        }
    }

    /// Bands must be non-negative and ordered
    pub fn is_ordered(&self) -> bool {
        self.affordable >= 0.0 && self.affordable <= self.stretch && self.stretch <= self.reach
    }
}

/// Thresholds used by affordability assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityThresholds {
    /// Bands on `cost / efc` for private institutions
    pub private_ratio: TierBands,
    /// Bands on `cost / efc` for public institutions
    pub public_ratio: TierBands,
    /// Bands on absolute annual cost when EFC is zero (private)
    pub private_zero_efc: TierBands,
    /// Bands on absolute annual cost when EFC is zero (public)
    pub public_zero_efc: TierBands,
    /// Max affordable cost = EFC * this
    pub stretch_multiplier: f64,
}

impl Default for AffordabilityThresholds {
    fn default() -> Self {
        let private_ratio = TierBands {
            affordable: 1.0,
            stretch: 1.5,
            reach: 2.5,
        };
        let private_zero_efc = TierBands {
            affordable: 0.0,
            stretch: 5_000.0,
            reach: 15_000.0,
        };
        Self {
            private_ratio,
            public_ratio: private_ratio.offset(PUBLIC_RATIO_OFFSET),
            private_zero_efc,
            public_zero_efc: private_zero_efc.scaled(1.0 + PUBLIC_RATIO_OFFSET),
            stretch_multiplier: 1.5,
        }
    }
}
