//! Simplified autoregressive estimator

use crate::data::Series;
use crate::error::{ForecastError, Result};
use crate::models::{ModelKind, PointEstimator};
use forecast_math::forecasting::autoregressive;

/// AR(p) model with fixed, equal coefficients.
///
/// The coefficients are hard-wired to `1 / order` instead of being fitted by
/// least squares. This is a deliberate simplification that the reported
/// backtest accuracy depends on, so it must not be replaced by a real fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Autoregressive {
    /// AR order (p)
    order: usize,
}

impl Autoregressive {
    pub const DEFAULT_ORDER: usize = 3;

    /// Create a new AR model of the given order
    pub fn new(order: usize) -> Result<Self> {
        if order == 0 {
            return Err(ForecastError::InvalidParameter(
                "AR order must be positive".to_string(),
            ));
        }

        Ok(Self { order })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// The fixed coefficient applied to each lag
    pub fn coefficient(&self) -> f64 {
        1.0 / self.order as f64
    }
}

impl Default for Autoregressive {
    fn default() -> Self {
        Self {
            order: Self::DEFAULT_ORDER,
        }
    }
}

impl PointEstimator for Autoregressive {
    fn kind(&self) -> ModelKind {
        ModelKind::Autoregressive
    }

    /// One fitted point per index from `order` on; empty for `order` or fewer points
    fn fitted(&self, series: &Series) -> Result<Vec<f64>> {
        Ok(autoregressive(&series.values(), self.order)?)
    }
}
