//! Point estimators combined by the ensemble
//!
//! Each estimator is a stateless function of a [`Series`] and its own
//! parameters. Only [`LinearTrend`] varies across forecast steps; the others
//! repeat their last fitted value for every step.

use crate::data::Series;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod autoregressive;
pub mod exponential_smoothing;
pub mod linear_trend;
pub mod moving_average;

pub use autoregressive::Autoregressive;
pub use exponential_smoothing::ExponentialSmoothing;
pub use linear_trend::LinearTrend;
pub use moving_average::MovingAverage;

/// The four estimators of the ensemble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    #[serde(rename = "MA")]
    MovingAverage,
    #[serde(rename = "ES")]
    ExponentialSmoothing,
    #[serde(rename = "AR")]
    Autoregressive,
    #[serde(rename = "LINEAR")]
    LinearTrend,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::MovingAverage,
        ModelKind::ExponentialSmoothing,
        ModelKind::Autoregressive,
        ModelKind::LinearTrend,
    ];
}

/// A value produced by one estimator for one forecast step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelEstimate {
    pub model: ModelKind,
    pub value: f64,
}

/// Per-model contribution to a forecast point.
///
/// An estimator that had too little data to produce a value reports 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelBreakdown {
    #[serde(rename = "MA")]
    pub moving_average: f64,
    #[serde(rename = "ES")]
    pub exponential_smoothing: f64,
    #[serde(rename = "AR")]
    pub autoregressive: f64,
    #[serde(rename = "LINEAR")]
    pub linear_trend: f64,
}

impl ModelBreakdown {
    pub fn get(&self, model: ModelKind) -> f64 {
        match model {
            ModelKind::MovingAverage => self.moving_average,
            ModelKind::ExponentialSmoothing => self.exponential_smoothing,
            ModelKind::Autoregressive => self.autoregressive,
            ModelKind::LinearTrend => self.linear_trend,
        }
    }

    pub fn set(&mut self, estimate: ModelEstimate) {
        let slot = match estimate.model {
            ModelKind::MovingAverage => &mut self.moving_average,
            ModelKind::ExponentialSmoothing => &mut self.exponential_smoothing,
            ModelKind::Autoregressive => &mut self.autoregressive,
            ModelKind::LinearTrend => &mut self.linear_trend,
        };
        *slot = estimate.value;
    }

    pub fn estimates(&self) -> [ModelEstimate; 4] {
        ModelKind::ALL.map(|model| ModelEstimate {
            model,
            value: self.get(model),
        })
    }
}

/// Common interface for the ensemble's point estimators
pub trait PointEstimator: Debug + Send + Sync {
    /// Which ensemble slot this estimator fills
    fn kind(&self) -> ModelKind;

    /// Fitted values, one per eligible index of the series.
    ///
    /// An empty result means the series is too short for this estimator.
    fn fitted(&self, series: &Series) -> Result<Vec<f64>>;

    /// Estimates for forecast steps `1..=horizon`.
    ///
    /// The default continuation repeats the last fitted value for every step.
    /// An empty result means no estimate is available.
    fn forecast(&self, series: &Series, horizon: usize) -> Result<Vec<f64>> {
        Ok(self
            .fitted(series)?
            .last()
            .map(|&last| vec![last; horizon])
            .unwrap_or_default())
    }
}
