//! Backtest validation of the ensemble on a held-out tail of the series

use crate::data::{Granularity, Series};
use crate::ensemble::{EnsembleForecaster, MIN_ENSEMBLE_POINTS};
use crate::error::{ForecastError, Result};
use forecast_math::statistics::{
    mean_absolute_percentage_error, root_mean_squared_error, signed_errors,
};
use forecast_math::MathError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Accuracy of the ensemble measured on the held-out tail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Mean Absolute Percentage Error, in percent, over non-zero actuals.
    ///
    /// 0 when every held-out actual is zero; `rmse` still reflects the miss.
    pub mape: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Signed `actual - predicted` per held-out point
    pub historical_errors: Vec<f64>,
    /// `max(0, 100 - mape)`
    pub accuracy_score: f64,
}

/// Holds out the trailing share of a series and scores the ensemble on it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backtester {
    holdout_ratio: f64,
}

impl Default for Backtester {
    fn default() -> Self {
        Self {
            holdout_ratio: Self::DEFAULT_HOLDOUT_RATIO,
        }
    }
}

impl Backtester {
    pub const DEFAULT_HOLDOUT_RATIO: f64 = 0.2;

    pub fn new(holdout_ratio: f64) -> Result<Self> {
        if !(holdout_ratio > 0.0 && holdout_ratio < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Holdout ratio must be in (0, 1), got {}",
                holdout_ratio
            )));
        }

        Ok(Self { holdout_ratio })
    }

    pub fn holdout_ratio(&self) -> f64 {
        self.holdout_ratio
    }

    /// `(training, test)` lengths for a series of `len` points.
    ///
    /// The test share is rounded down, the training share takes the rest.
    pub fn split_sizes(&self, len: usize) -> (usize, usize) {
        // The epsilon absorbs representation error, e.g. 0.29 * 100 = 28.999...
        let test = ((len as f64 * self.holdout_ratio) + 1e-9).floor() as usize;
        (len - test.min(len), test.min(len))
    }

    /// Split the series into training and test parts
    pub fn split(&self, series: &Series) -> Result<(Series, Series)> {
        let (training, test) = self.split_sizes(series.len());

        if training < MIN_ENSEMBLE_POINTS || test == 0 {
            return Err(ForecastError::InsufficientDataForValidation(format!(
                "{} points split into {} training / {} test; \
                 need at least {} training and 1 test point",
                series.len(),
                training,
                test,
                MIN_ENSEMBLE_POINTS
            )));
        }

        series.split_at(training)
    }

    /// Forecast the test span from the training span and score the result
    pub fn validate(
        &self,
        forecaster: &EnsembleForecaster,
        series: &Series,
        granularity: Granularity,
    ) -> Result<ValidationReport> {
        let (training, test) = self.split(series)?;

        let predictions = forecaster.forecast(&training, granularity, test.len())?;
        if predictions.len() != test.len() {
            return Err(ForecastError::CalculationError(format!(
                "Ensemble produced {} predictions for {} held-out points",
                predictions.len(),
                test.len()
            )));
        }

        let actual = test.values();
        let predicted: Vec<f64> = predictions.iter().map(|p| p.value).collect();

        let mape = match mean_absolute_percentage_error(&actual, &predicted) {
            Ok(mape) => mape,
            // Every held-out actual is zero, e.g. a closed shop
            Err(MathError::InsufficientData(reason)) => {
                debug!(%reason, "no non-zero actuals in the test span, reporting MAPE as 0");
                0.0
            }
            Err(err) => return Err(err.into()),
        };
        let rmse = root_mean_squared_error(&actual, &predicted)?;
        let historical_errors = signed_errors(&actual, &predicted)?;

        debug!(
            training = training.len(),
            test = test.len(),
            mape,
            rmse,
            "backtest complete"
        );

        Ok(ValidationReport {
            mape,
            rmse,
            historical_errors,
            accuracy_score: (100.0 - mape).max(0.0),
        })
    }
}
