//! # Sales Forecast
//!
//! Near-term forecasting of periodic retail totals (daily, weekly or monthly
//! sales) for the branch reporting dashboard.
//!
//! ## Features
//!
//! - Series preprocessing: date parsing, numeric coercion, branch aggregation
//! - Four point estimators: Moving Average, Exponential Smoothing, a
//!   fixed-coefficient AR model and a Linear Trend
//! - Multiplicative seasonal indices (7 for daily, 4 for weekly, 12 for monthly data)
//! - A weighted ensemble with a self-validating backtest (MAPE, RMSE)
//! - Confidence intervals from the backtest errors
//!
//! Everything is pure computation over in-memory data: identical input always
//! yields identical output, and an engine can be shared across threads.
//!
//! ## Quick Start
//!
//! ```rust
//! use sales_forecast::{
//!     preprocess, ForecastEngine, Granularity, PreprocessOptions, RawObservation,
//! };
//!
//! let raw: Vec<RawObservation> = (1..=10)
//!     .map(|day| RawObservation::number(format!("2024-03-{:02}", day), 100.0 + day as f64))
//!     .collect();
//!
//! let series = preprocess(&raw, &PreprocessOptions::default())?;
//! let report = ForecastEngine::default().run(&series, Granularity::Daily)?;
//!
//! assert_eq!(report.forecasts.len(), 3);
//! assert!(report.validation.accuracy_score <= 100.0);
//! # Ok::<(), sales_forecast::ForecastError>(())
//! ```

pub mod cache;
pub mod confidence;
pub mod config;
pub mod data;
pub mod engine;
pub mod ensemble;
pub mod error;
pub mod insights;
pub mod models;
pub mod preprocess;
pub mod seasonal;
pub mod validation;

// Re-export commonly used types
pub use crate::cache::{CacheKey, ForecastCache, InMemoryCache};
pub use crate::confidence::{ConfidenceCalculator, ConfidenceInterval};
pub use crate::config::ForecastConfig;
pub use crate::data::{Granularity, ObservedPoint, Series};
pub use crate::engine::{ForecastEngine, ForecastPoint, ForecastReport};
pub use crate::ensemble::{
    EnsembleForecaster, EnsemblePoint, EnsembleWeights, MIN_ENSEMBLE_POINTS,
};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{ModelBreakdown, ModelEstimate, ModelKind, PointEstimator};
pub use crate::preprocess::{
    aggregate_branches, preprocess, PreprocessOptions, RawObservation, RawValue,
};
pub use crate::seasonal::SeasonalProfile;
pub use crate::validation::{Backtester, ValidationReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
