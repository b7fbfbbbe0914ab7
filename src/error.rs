//! Error types shared by the calculators and loaders

/// Errors raised by this crate
///
/// Calculators only ever return [`CalcError::InvalidInput`]; the remaining
/// variants come from loading assumptions or institution data from disk.
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalcError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field for validation failures
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CalcError::InvalidInput { field, .. } => Some(*field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

/// Reject negative or non-finite currency amounts
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, format!("must be finite, got {}", value)));
    }
    if value < 0.0 {
        return Err(CalcError::invalid(field, format!("must be >= 0, got {}", value)));
    }
    Ok(())
}

/// Reject zero counts (years of study, career years, loan terms)
pub(crate) fn require_positive_count(field: &'static str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(CalcError::invalid(field, "must be > 0"));
    }
    Ok(())
}
