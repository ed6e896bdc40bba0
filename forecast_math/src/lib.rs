//! # Forecast Math
//!
//! Numeric kernels used by the sales forecasting engine.
//! Every function works on plain `&[f64]` slices, is free of side effects and
//! returns the same output for the same input.

use thiserror::Error;

// Kernel modules
pub mod forecasting;
pub mod moving_averages;
pub mod statistics;

/// Errors that can occur in forecasting math
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;
