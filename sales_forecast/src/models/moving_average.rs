//! Moving average estimator

use crate::data::Series;
use crate::error::{ForecastError, Result};
use crate::models::{ModelKind, PointEstimator};
use forecast_math::moving_averages::simple_moving_average;
use tracing::debug;

/// Trailing simple moving average over a fixed window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingAverage {
    window: usize,
}

impl MovingAverage {
    pub const DEFAULT_WINDOW: usize = 3;

    /// Create a new moving average estimator
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }

        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self {
            window: Self::DEFAULT_WINDOW,
        }
    }
}

impl PointEstimator for MovingAverage {
    fn kind(&self) -> ModelKind {
        ModelKind::MovingAverage
    }

    fn fitted(&self, series: &Series) -> Result<Vec<f64>> {
        let averages = simple_moving_average(&series.values(), self.window)?;
        if averages.is_empty() {
            debug!(
                window = self.window,
                len = series.len(),
                "series shorter than moving average window"
            );
        }
        Ok(averages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Granularity;
    use chrono::NaiveDate;

    fn series(values: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Series::from_values(start, Granularity::Daily, values).unwrap()
    }

    #[test]
    fn test_moving_average_window_three() {
        let model = MovingAverage::default();

        assert_eq!(model.fitted(&series(&[10.0, 20.0, 30.0])).unwrap(), vec![20.0]);
        assert_eq!(model.forecast(&series(&[10.0, 20.0, 30.0]), 2).unwrap(), vec![20.0, 20.0]);
    }

    #[test]
    fn test_moving_average_under_window_is_empty() {
        let model = MovingAverage::new(3).unwrap();

        assert!(model.fitted(&series(&[10.0, 20.0])).unwrap().is_empty());
        assert!(model.forecast(&series(&[10.0, 20.0]), 3).unwrap().is_empty());
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(matches!(
            MovingAverage::new(0),
            Err(ForecastError::InvalidParameter(_))
        ));
    }
}
