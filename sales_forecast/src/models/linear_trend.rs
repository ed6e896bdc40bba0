//! Linear trend estimator

use crate::data::Series;
use crate::error::Result;
use crate::models::{ModelKind, PointEstimator};
use forecast_math::forecasting::LinearRegression;

/// Ordinary least squares line through `(index, value)`.
///
/// The only estimator whose forecast changes with the step: step `k` reads
/// the line at position `n + k - 1`, so the first step lands on index `n`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinearTrend;

impl LinearTrend {
    pub fn new() -> Self {
        Self
    }

    /// Fit the trend line; a single point has no index variance and fails
    pub fn fit(&self, series: &Series) -> Result<LinearRegression> {
        Ok(LinearRegression::fit(&series.values())?)
    }
}

impl PointEstimator for LinearTrend {
    fn kind(&self) -> ModelKind {
        ModelKind::LinearTrend
    }

    fn fitted(&self, series: &Series) -> Result<Vec<f64>> {
        Ok(self.fit(series)?.fitted())
    }

    fn forecast(&self, series: &Series, horizon: usize) -> Result<Vec<f64>> {
        let regression = self.fit(series)?;
        Ok((1..=horizon).map(|step| regression.forecast(step)).collect())
    }
}
