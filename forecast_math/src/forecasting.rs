//! Forecasting kernels for time series prediction
//!
//! Contains:
//! - Ordinary least squares Linear Regression against the index position
//! - Simplified autoregression with fixed, equal coefficients

use crate::{MathError, Result};

/// Linear Regression of values against their index position `0..n`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression {
    slope: f64,
    intercept: f64,
    observations: usize,
}

impl LinearRegression {
    /// Fit slope and intercept by ordinary least squares
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Linear regression needs at least 2 points, have {}",
                values.len()
            )));
        }

        let n = values.len() as f64;

        // Calculate means
        let x_mean = (values.len() - 1) as f64 / 2.0;
        let y_mean = values.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for (i, &y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            numerator += dx * (y - y_mean);
            denominator += dx * dx;
        }

        if denominator.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values have no variance".to_string(),
            ));
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        Ok(Self {
            slope,
            intercept,
            observations: values.len(),
        })
    }

    /// Value of the fitted line at index position `x`
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Fitted values for the observed positions `0..n`
    pub fn fitted(&self) -> Vec<f64> {
        (0..self.observations)
            .map(|i| self.value_at(i as f64))
            .collect()
    }

    /// Extrapolate `periods_ahead` steps past the last observation.
    ///
    /// One step ahead lands on position `n`.
    pub fn forecast(&self, periods_ahead: usize) -> f64 {
        self.value_at((self.observations + periods_ahead - 1) as f64)
    }

    /// Get the slope (trend direction and strength)
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Get the intercept
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of observations the line was fitted on
    pub fn observations(&self) -> usize {
        self.observations
    }
}

/// Simplified autoregressive fit of the given order.
///
/// Coefficients are fixed at `1 / order` each rather than estimated by least
/// squares, so every fitted point is the mean of the `order` values before it.
/// Output index `j` corresponds to input index `order + j`. A series with
/// `order` or fewer values yields an empty result.
pub fn autoregressive(values: &[f64], order: usize) -> Result<Vec<f64>> {
    if order == 0 {
        return Err(MathError::InvalidInput(
            "Autoregressive order must be greater than zero".to_string(),
        ));
    }

    if values.len() < order + 1 {
        return Ok(Vec::new());
    }

    let coefficient = 1.0 / order as f64;
    let fitted = (order..values.len())
        .map(|i| {
            (1..=order)
                .map(|lag| coefficient * values[i - lag])
                .sum::<f64>()
        })
        .collect();

    Ok(fitted)
}
