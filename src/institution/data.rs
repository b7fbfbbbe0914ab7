//! Institution records as stored by the data pipeline

use serde::{Deserialize, Serialize};

use crate::assumptions::RoiDefaults;
use crate::roi::RoiInputs;

/// Control type of an institution (IPEDS CONTROL code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstitutionType {
    Public,
    PrivateNonprofit,
    #[serde(rename = "private-forprofit")]
    PrivateForProfit,
}

impl InstitutionType {
    /// 1 = public, 2 = private nonprofit, anything else = private for-profit
    pub fn from_control_code(code: u8) -> Self {
        match code {
            1 => InstitutionType::Public,
            2 => InstitutionType::PrivateNonprofit,
            _ => InstitutionType::PrivateForProfit,
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, InstitutionType::Public)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InstitutionType::Public => "public",
            InstitutionType::PrivateNonprofit => "private-nonprofit",
            InstitutionType::PrivateForProfit => "private-forprofit",
        }
    }
}

/// One institution's cost and outcome data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    /// IPEDS unit identifier
    pub unit_id: u32,

    pub name: String,

    /// Two-letter state code
    pub state: Option<String>,

    pub institution_type: InstitutionType,

    pub tuition_in_state: Option<f64>,
    pub tuition_out_state: Option<f64>,
    pub fees: Option<f64>,
    pub room_board: Option<f64>,
    pub books_supplies: Option<f64>,

    /// Median earnings 10 years after entry (College Scorecard)
    pub median_earnings_10yr: Option<f64>,
}

impl Institution {
    /// Tuition for the requested residency, falling back to the other figure
    pub fn tuition(&self, in_state: bool) -> Option<f64> {
        if in_state {
            self.tuition_in_state.or(self.tuition_out_state)
        } else {
            self.tuition_out_state.or(self.tuition_in_state)
        }
    }

    /// Annual sticker cost: tuition + fees + room & board
    pub fn annual_cost(&self, in_state: bool) -> f64 {
        self.tuition(in_state).unwrap_or(0.0)
            + self.fees.unwrap_or(0.0)
            + self.room_board.unwrap_or(0.0)
    }

    /// Build ROI inputs from this record
    ///
    /// Returns `None` when tuition or earnings are missing; those rows cannot
    /// produce a meaningful ROI.
    pub fn roi_inputs(
        &self,
        defaults: &RoiDefaults,
        in_state: bool,
        include_room_board: bool,
        include_books_supplies: bool,
    ) -> Option<RoiInputs> {
        let tuition = self.tuition(in_state)?;
        let earnings = self.median_earnings_10yr?;

        Some(RoiInputs {
            annual_tuition: tuition,
            annual_fees: self.fees.unwrap_or(0.0),
            annual_room_board: self.room_board,
            annual_books_supplies: self.books_supplies,
            years_of_study: defaults.years_of_study,
            median_earnings_10yr: earnings,
            baseline_earnings: defaults.baseline_earnings,
            include_room_board,
            include_books_supplies,
            career_years: defaults.career_years,
            annual_grants: 0.0,
            annual_scholarships: 0.0,
        })
    }
}
