//! Engine configuration

use crate::confidence::ConfidenceCalculator;
use crate::ensemble::EnsembleWeights;
use crate::error::{ForecastError, Result};
use crate::models::{Autoregressive, ExponentialSmoothing, MovingAverage};
use crate::validation::Backtester;
use serde::{Deserialize, Serialize};

/// Tunable parameters of the forecasting engine.
///
/// Every field has a default, so a partial JSON document (or `{}`) is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of future periods to forecast
    pub horizon: usize,
    /// Window of the moving average estimator
    pub moving_average_window: usize,
    /// Smoothing factor of the exponential smoothing estimator
    pub smoothing_alpha: f64,
    /// Order of the autoregressive estimator
    pub ar_order: usize,
    /// Ensemble weights, must sum to 1
    pub weights: EnsembleWeights,
    /// Share of the series held out by the backtest
    pub holdout_ratio: f64,
    /// Two-sided confidence level of the forecast interval
    pub confidence_level: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 3,
            moving_average_window: MovingAverage::DEFAULT_WINDOW,
            smoothing_alpha: ExponentialSmoothing::DEFAULT_ALPHA,
            ar_order: Autoregressive::DEFAULT_ORDER,
            weights: EnsembleWeights::default(),
            holdout_ratio: Backtester::DEFAULT_HOLDOUT_RATIO,
            confidence_level: 0.95,
        }
    }
}

impl ForecastConfig {
    /// Parse a configuration from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ForecastConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter, reporting the first one out of range
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be at least 1".to_string(),
            ));
        }

        MovingAverage::new(self.moving_average_window)?;
        ExponentialSmoothing::new(self.smoothing_alpha)?;
        Autoregressive::new(self.ar_order)?;
        self.weights.validate()?;
        Backtester::new(self.holdout_ratio)?;
        ConfidenceCalculator::for_level(self.confidence_level)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = ForecastConfig::default();

        assert_eq!(config.horizon, 3);
        assert_eq!(config.moving_average_window, 3);
        assert_eq!(config.smoothing_alpha, 0.3);
        assert_eq!(config.ar_order, 3);
        assert_eq!(config.holdout_ratio, 0.2);
        assert_eq!(config.weights, EnsembleWeights::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ForecastConfig::from_json_str(r#"{"horizon": 6, "smoothing_alpha": 0.5}"#)
            .unwrap();

        assert_eq!(
            config,
            ForecastConfig {
                horizon: 6,
                smoothing_alpha: 0.5,
                ..ForecastConfig::default()
            }
        );
    }

    #[rstest]
    #[case(r#"{"horizon": 0}"#)]
    #[case(r#"{"moving_average_window": 0}"#)]
    #[case(r#"{"smoothing_alpha": 1.5}"#)]
    #[case(r#"{"ar_order": 0}"#)]
    #[case(r#"{"weights": {"ma": 0.5, "es": 0.5, "ar": 0.5, "linear": 0.5}}"#)]
    #[case(r#"{"holdout_ratio": 1.0}"#)]
    #[case(r#"{"confidence_level": 0.8}"#)]
    fn test_invalid_configs(#[case] json: &str) {
        assert!(matches!(
            ForecastConfig::from_json_str(json),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ForecastConfig::from_json_str("{horizon"),
            Err(ForecastError::Serialization(_))
        ));
    }
}
