//! Return on investment of a degree

mod calculator;
mod npv;

pub use calculator::{calculate_roi, Payback, RoiInputs, RoiResult};
pub use npv::{net_present_value, pv_annuity_ordinary};
