//! Exponential smoothing estimator

use crate::data::Series;
use crate::error::{ForecastError, Result};
use crate::models::{ModelKind, PointEstimator};
use forecast_math::moving_averages::exponential_smoothing;

/// Simple exponential smoothing model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialSmoothing {
    /// Smoothing parameter
    alpha: f64,
}

impl ExponentialSmoothing {
    pub const DEFAULT_ALPHA: f64 = 0.3;

    /// Create a new exponential smoothing model
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Alpha must be in (0, 1], got {}",
                alpha
            )));
        }

        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Default for ExponentialSmoothing {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
        }
    }
}

impl PointEstimator for ExponentialSmoothing {
    fn kind(&self) -> ModelKind {
        ModelKind::ExponentialSmoothing
    }

    fn fitted(&self, series: &Series) -> Result<Vec<f64>> {
        Ok(exponential_smoothing(&series.values(), self.alpha)?)
    }
}
