//! # Retail Insights
//!
//! Facade over the forecasting workspace.
//!
//! - [`forecast`]: the forecasting engine (`sales_forecast`)
//! - [`math`]: numeric kernels it is built on (`forecast_math`)
//!
//! ## Example
//!
//! ```
//! use retail_insights_workspace::forecast::{
//!     preprocess, ForecastEngine, Granularity, PreprocessOptions, RawObservation,
//! };
//!
//! let dates = ["2024-01-01", "2024-01-08", "2024-01-15", "2024-01-22", "2024-01-29"];
//! let raw: Vec<RawObservation> = dates
//!     .iter()
//!     .zip([10.0, 12.0, 11.0, 13.0, 12.0])
//!     .map(|(date, total)| RawObservation::number(*date, total))
//!     .collect();
//!
//! let series = preprocess(&raw, &PreprocessOptions::default()).unwrap();
//! let report = ForecastEngine::default().run(&series, Granularity::Weekly).unwrap();
//! assert_eq!(report.forecasts.len(), 3);
//! ```

pub use forecast_math as math;
pub use sales_forecast as forecast;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_are_wired() {
        let sma = math::moving_averages::simple_moving_average(&[1.0, 2.0, 3.0], 3).unwrap();
        assert_eq!(sma, vec![2.0]);
        assert_eq!(forecast::NAME, "sales_forecast");
    }
}
