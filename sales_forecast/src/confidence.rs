//! Confidence intervals from backtest errors

use crate::error::{ForecastError, Result};
use forecast_math::statistics::root_mean_square;
use serde::{Deserialize, Serialize};

/// Symmetric interval around a forecast value, lower bound never negative
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Turns historical forecast errors into an interval of `z` standard deviations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceCalculator {
    z_score: f64,
}

impl Default for ConfidenceCalculator {
    fn default() -> Self {
        Self {
            z_score: Self::Z_95,
        }
    }
}

impl ConfidenceCalculator {
    /// Two-sided 95% normal quantile
    pub const Z_95: f64 = 1.96;

    pub fn new(z_score: f64) -> Result<Self> {
        if !(z_score.is_finite() && z_score > 0.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "z-score must be positive, got {}",
                z_score
            )));
        }

        Ok(Self { z_score })
    }

    /// Calculator for one of the supported two-sided confidence levels
    pub fn for_level(confidence_level: f64) -> Result<Self> {
        let z_score = match confidence_level {
            c if (c - 0.99).abs() < 1e-9 => 2.576,
            c if (c - 0.95).abs() < 1e-9 => Self::Z_95,
            c if (c - 0.90).abs() < 1e-9 => 1.645,
            other => {
                return Err(ForecastError::InvalidParameter(format!(
                    "Unsupported confidence level {}; use 0.90, 0.95 or 0.99",
                    other
                )))
            }
        };

        Ok(Self { z_score })
    }

    pub fn z_score(&self) -> f64 {
        self.z_score
    }

    /// Standard deviation of the errors, taking them to be zero-mean.
    ///
    /// This is `sqrt(mean(e^2))`; no mean is subtracted first.
    pub fn standard_deviation(errors: &[f64]) -> Result<f64> {
        if errors.is_empty() {
            return Err(ForecastError::InsufficientData(
                "Confidence interval needs at least one historical error".to_string(),
            ));
        }

        Ok(root_mean_square(errors)?)
    }

    /// Interval `value ± z * sd` with the lower bound clamped at 0
    pub fn interval(&self, value: f64, historical_errors: &[f64]) -> Result<ConfidenceInterval> {
        let margin = self.z_score * Self::standard_deviation(historical_errors)?;

        Ok(ConfidenceInterval {
            lower: (value - margin).max(0.0),
            upper: value + margin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_interval_width() {
        // sd = sqrt((9 + 16) / 2)
        let sd = 12.5_f64.sqrt();
        let interval = ConfidenceCalculator::default()
            .interval(100.0, &[3.0, -4.0])
            .unwrap();

        assert_relative_eq!(interval.lower, 100.0 - 1.96 * sd, epsilon = 1e-12);
        assert_relative_eq!(interval.upper, 100.0 + 1.96 * sd, epsilon = 1e-12);
    }

    #[test]
    fn test_lower_bound_clamped() {
        let interval = ConfidenceCalculator::default()
            .interval(5.0, &[50.0, -50.0])
            .unwrap();

        assert_eq!(interval.lower, 0.0);
        assert_relative_eq!(interval.upper, 5.0 + 1.96 * 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_errors_insufficient() {
        assert!(matches!(
            ConfidenceCalculator::default().interval(10.0, &[]),
            Err(ForecastError::InsufficientData(_))
        ));
    }

    #[rstest]
    #[case(0.90, 1.645)]
    #[case(0.95, 1.96)]
    #[case(0.99, 2.576)]
    fn test_levels(#[case] level: f64, #[case] z: f64) {
        assert_eq!(ConfidenceCalculator::for_level(level).unwrap().z_score(), z);
    }

    #[test]
    fn test_unsupported_level() {
        assert!(ConfidenceCalculator::for_level(0.8).is_err());
        assert!(ConfidenceCalculator::new(-1.0).is_err());
    }
}
