//! Ensemble combiner: blends the point estimators into future totals

use crate::config::ForecastConfig;
use crate::data::{Granularity, Series};
use crate::error::{ForecastError, Result};
use crate::models::{
    Autoregressive, ExponentialSmoothing, LinearTrend, ModelBreakdown, ModelEstimate, ModelKind,
    MovingAverage, PointEstimator,
};
use crate::seasonal::SeasonalProfile;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fewer observations than this produce no forecast at all
pub const MIN_ENSEMBLE_POINTS: usize = 4;

/// Weight of each estimator in the blend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleWeights {
    pub ma: f64,
    pub es: f64,
    pub ar: f64,
    pub linear: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            ma: 0.25,
            es: 0.25,
            ar: 0.25,
            linear: 0.25,
        }
    }
}

impl EnsembleWeights {
    pub fn weight(&self, model: ModelKind) -> f64 {
        match model {
            ModelKind::MovingAverage => self.ma,
            ModelKind::ExponentialSmoothing => self.es,
            ModelKind::Autoregressive => self.ar,
            ModelKind::LinearTrend => self.linear,
        }
    }

    /// Weights must be finite, non-negative and sum to 1
    pub fn validate(&self) -> Result<()> {
        let weights = ModelKind::ALL.map(|model| self.weight(model));
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Ensemble weights must be non-negative: {:?}",
                self
            )));
        }

        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > 1e-9 {
            return Err(ForecastError::InvalidParameter(format!(
                "Ensemble weights must sum to 1, got {}",
                total
            )));
        }

        Ok(())
    }

    /// Weighted sum of the per-model estimates
    pub fn combine(&self, breakdown: &ModelBreakdown) -> f64 {
        breakdown
            .estimates()
            .iter()
            .map(|estimate| self.weight(estimate.model) * estimate.value)
            .sum()
    }
}

/// One future period as produced by the combiner, before intervals are attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsemblePoint {
    pub timestamp: NaiveDate,
    /// Non-negative, rounded to whole currency units
    pub value: f64,
    /// Per-model estimates, rounded to whole currency units
    pub model_breakdown: ModelBreakdown,
}

/// Weighted blend of the four point estimators with seasonal adjustment
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleForecaster {
    moving_average: MovingAverage,
    exponential_smoothing: ExponentialSmoothing,
    autoregressive: Autoregressive,
    linear_trend: LinearTrend,
    weights: EnsembleWeights,
}

impl Default for EnsembleForecaster {
    fn default() -> Self {
        Self {
            moving_average: MovingAverage::default(),
            exponential_smoothing: ExponentialSmoothing::default(),
            autoregressive: Autoregressive::default(),
            linear_trend: LinearTrend,
            weights: EnsembleWeights::default(),
        }
    }
}

impl EnsembleForecaster {
    pub fn new(
        moving_average: MovingAverage,
        exponential_smoothing: ExponentialSmoothing,
        autoregressive: Autoregressive,
        weights: EnsembleWeights,
    ) -> Result<Self> {
        weights.validate()?;

        Ok(Self {
            moving_average,
            exponential_smoothing,
            autoregressive,
            linear_trend: LinearTrend,
            weights,
        })
    }

    pub fn from_config(config: &ForecastConfig) -> Result<Self> {
        Self::new(
            MovingAverage::new(config.moving_average_window)?,
            ExponentialSmoothing::new(config.smoothing_alpha)?,
            Autoregressive::new(config.ar_order)?,
            config.weights,
        )
    }

    pub fn weights(&self) -> &EnsembleWeights {
        &self.weights
    }

    fn estimators(&self) -> [&dyn PointEstimator; 4] {
        [
            &self.moving_average,
            &self.exponential_smoothing,
            &self.autoregressive,
            &self.linear_trend,
        ]
    }

    /// Forecast `horizon` periods past the end of `series`.
    ///
    /// A series shorter than [`MIN_ENSEMBLE_POINTS`] yields an empty forecast;
    /// callers treat that as "no forecast available". Estimators without an
    /// estimate contribute 0 to the blend.
    pub fn forecast(
        &self,
        series: &Series,
        granularity: Granularity,
        horizon: usize,
    ) -> Result<Vec<EnsemblePoint>> {
        if series.len() < MIN_ENSEMBLE_POINTS {
            debug!(
                len = series.len(),
                min = MIN_ENSEMBLE_POINTS,
                "series too short for an ensemble forecast"
            );
            return Ok(Vec::new());
        }

        let per_model = self
            .estimators()
            .iter()
            .map(|estimator| Ok((estimator.kind(), estimator.forecast(series, horizon)?)))
            .collect::<Result<Vec<_>>>()?;

        let profile = SeasonalProfile::compute(&series.values(), granularity.season_length())?;
        let n = series.len();
        let last_timestamp = series.last_timestamp();

        (1..=horizon)
            .map(|step| {
                let mut raw = ModelBreakdown::default();
                for (model, estimates) in &per_model {
                    raw.set(ModelEstimate {
                        model: *model,
                        value: estimates.get(step - 1).copied().unwrap_or(0.0),
                    });
                }

                let blended = self.weights.combine(&raw);
                let adjusted = profile.reseasonalize(blended, n + step - 1);

                Ok(EnsemblePoint {
                    timestamp: granularity.advance(last_timestamp, step)?,
                    value: adjusted.max(0.0).round(),
                    model_breakdown: rounded(&raw),
                })
            })
            .collect()
    }
}

fn rounded(breakdown: &ModelBreakdown) -> ModelBreakdown {
    let mut out = ModelBreakdown::default();
    for estimate in breakdown.estimates() {
        out.set(ModelEstimate {
            model: estimate.model,
            value: estimate.value.round(),
        });
    }
    out
}
