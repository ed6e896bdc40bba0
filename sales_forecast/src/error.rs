//! Error types for the sales_forecast crate

use forecast_math::MathError;
use thiserror::Error;

/// Custom error types for the sales_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Malformed input series: bad dates, duplicates, missing or negative values
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    /// An operation's minimum-length precondition is not met
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The training split left after the holdout cut is too small to backtest
    #[error("Insufficient data for validation: {0}")]
    InsufficientDataForValidation(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from numeric operations
    #[error("Calculation error: {0}")]
    CalculationError(String),

    /// The forecast cache could not be read or written
    #[error("Cache error: {0}")]
    Cache(String),

    /// Error from JSON (de)serialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ForecastError {
    /// True for the "not enough history to forecast" family.
    ///
    /// Callers surface these as a user-visible empty state rather than a
    /// server failure.
    pub fn is_insufficient_history(&self) -> bool {
        matches!(
            self,
            ForecastError::InsufficientData(_) | ForecastError::InsufficientDataForValidation(_)
        )
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData(msg) => ForecastError::InsufficientData(msg),
            MathError::InvalidInput(msg) => ForecastError::InvalidParameter(msg),
            MathError::CalculationError(msg) => ForecastError::CalculationError(msg),
        }
    }
}
