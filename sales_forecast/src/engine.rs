//! End-to-end forecasting: backtest, ensemble forecast and confidence bounds

use crate::cache::{CacheKey, ForecastCache};
use crate::confidence::ConfidenceCalculator;
use crate::config::ForecastConfig;
use crate::data::{Granularity, Series};
use crate::ensemble::EnsembleForecaster;
use crate::error::{ForecastError, Result};
use crate::models::ModelBreakdown;
use crate::validation::{Backtester, ValidationReport};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One forecast period with its 95% (or configured) interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub timestamp: NaiveDate,
    /// Whole currency units, never negative
    pub value: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub model_breakdown: ModelBreakdown,
}

/// Output of one engine run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub granularity: Granularity,
    pub forecasts: Vec<ForecastPoint>,
    pub validation: ValidationReport,
}

impl ForecastReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Ties the ensemble, backtester and interval calculator together.
///
/// Holds no mutable state; one engine can serve concurrent requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEngine {
    config: ForecastConfig,
    ensemble: EnsembleForecaster,
    backtester: Backtester,
    confidence: ConfidenceCalculator,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self {
            config: ForecastConfig::default(),
            ensemble: EnsembleForecaster::default(),
            backtester: Backtester::default(),
            confidence: ConfidenceCalculator::default(),
        }
    }
}

impl ForecastEngine {
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ensemble: EnsembleForecaster::from_config(&config)?,
            backtester: Backtester::new(config.holdout_ratio)?,
            confidence: ConfidenceCalculator::for_level(config.confidence_level)?,
            config,
        })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast the configured horizon
    pub fn run(&self, series: &Series, granularity: Granularity) -> Result<ForecastReport> {
        self.run_with_horizon(series, granularity, self.config.horizon)
    }

    /// Backtest, then forecast `horizon` periods and attach confidence bounds.
    ///
    /// Fails with `InsufficientDataForValidation` when the series cannot be
    /// backtested; no partial report is returned.
    pub fn run_with_horizon(
        &self,
        series: &Series,
        granularity: Granularity,
        horizon: usize,
    ) -> Result<ForecastReport> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be at least 1".to_string(),
            ));
        }

        let validation = self.backtester.validate(&self.ensemble, series, granularity)?;

        let forecasts = self
            .ensemble
            .forecast(series, granularity, horizon)?
            .into_iter()
            .map(|point| {
                let interval = self
                    .confidence
                    .interval(point.value, &validation.historical_errors)?;
                Ok(ForecastPoint {
                    timestamp: point.timestamp,
                    value: point.value,
                    lower_bound: interval.lower.round(),
                    upper_bound: interval.upper.round(),
                    model_breakdown: point.model_breakdown,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            len = series.len(),
            %granularity,
            horizon,
            mape = validation.mape,
            rmse = validation.rmse,
            "forecast computed"
        );

        Ok(ForecastReport {
            granularity,
            forecasts,
            validation,
        })
    }

    /// Like [`run`](Self::run), reading through `cache` first.
    ///
    /// The key's granularity drives the run. A cached entry that no longer
    /// deserializes is recomputed and overwritten. Cache failures are
    /// returned as [`ForecastError::Cache`].
    pub fn run_cached(
        &self,
        cache: &dyn ForecastCache,
        key: &CacheKey,
        series: &Series,
    ) -> Result<ForecastReport> {
        let cache_key = key.to_string();

        if let Some(cached) = cache.get(&cache_key)? {
            match ForecastReport::from_json(&cached) {
                Ok(report) => {
                    debug!(key = %cache_key, "forecast cache hit");
                    return Ok(report);
                }
                Err(err) => {
                    warn!(key = %cache_key, error = %err, "discarding unreadable cached forecast")
                }
            }
        }

        let report = self.run(series, key.granularity)?;
        cache.set(&cache_key, report.to_json()?)?;
        Ok(report)
    }
}
