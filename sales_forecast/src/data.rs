//! Time series data handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reporting cadence of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One total per day, weekly seasonality
    #[default]
    Daily,
    /// One total per week, four-week seasonality
    Weekly,
    /// One total per calendar month, yearly seasonality
    Monthly,
}

impl Granularity {
    /// Seasonal period length used by the decomposer
    pub fn season_length(self) -> usize {
        match self {
            Granularity::Daily => 7,
            Granularity::Weekly => 4,
            Granularity::Monthly => 12,
        }
    }

    /// Advance `date` by one period unit, `steps` times.
    ///
    /// Monthly steps land on the same day of the next month, clamped to the
    /// month's last day.
    pub fn advance(self, date: NaiveDate, steps: usize) -> Result<NaiveDate> {
        let mut current = date;
        for _ in 0..steps {
            let next = match self {
                Granularity::Daily => current.checked_add_days(Days::new(1)),
                Granularity::Weekly => current.checked_add_days(Days::new(7)),
                Granularity::Monthly => current.checked_add_months(Months::new(1)),
            };
            current = next.ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "Date {} cannot be advanced by {} {} step(s)",
                    date, steps, self
                ))
            })?;
        }
        Ok(current)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "d" => Ok(Granularity::Daily),
            "weekly" | "w" => Ok(Granularity::Weekly),
            "monthly" | "m" => Ok(Granularity::Monthly),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unsupported granularity: {}",
                other
            ))),
        }
    }
}

/// One observed periodic total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservedPoint {
    /// Start date of the period
    pub timestamp: NaiveDate,
    /// Monetary total for the period, never negative
    pub value: f64,
}

impl ObservedPoint {
    pub fn new(timestamp: NaiveDate, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Validated, time-ordered series of observations.
///
/// Invariants: at least one point, timestamps strictly increasing, values
/// finite and non-negative. Deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ObservedPoint>", into = "Vec<ObservedPoint>")]
pub struct Series {
    points: Vec<ObservedPoint>,
}

impl Series {
    /// Create a series, checking ordering and value invariants
    pub fn new(points: Vec<ObservedPoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(ForecastError::InsufficientData(
                "Series must contain at least one observation".to_string(),
            ));
        }

        for point in &points {
            if !point.value.is_finite() || point.value < 0.0 {
                return Err(ForecastError::InvalidSeries(format!(
                    "Value {} on {} is not a non-negative number",
                    point.value, point.timestamp
                )));
            }
        }

        if let Some(pair) = points
            .windows(2)
            .find(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(ForecastError::InvalidSeries(format!(
                "Timestamps must be strictly increasing: {} is followed by {}",
                pair[0].timestamp, pair[1].timestamp
            )));
        }

        Ok(Self { points })
    }

    /// Build a series from dates and values (handy for tests and demos)
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(timestamp, value)| ObservedPoint::new(timestamp, value))
                .collect(),
        )
    }

    /// Build an evenly spaced series starting at `start`, one value per period
    pub fn from_values(start: NaiveDate, granularity: Granularity, values: &[f64]) -> Result<Self> {
        let mut points = Vec::with_capacity(values.len());
        let mut timestamp = start;
        for (i, &value) in values.iter().enumerate() {
            if i > 0 {
                timestamp = granularity.advance(timestamp, 1)?;
            }
            points.push(ObservedPoint::new(timestamp, value));
        }
        Self::new(points)
    }

    pub fn points(&self) -> &[ObservedPoint] {
        &self.points
    }

    /// The observed values in time order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_timestamp(&self) -> NaiveDate {
        self.points[self.points.len() - 1].timestamp
    }

    pub fn last_value(&self) -> f64 {
        self.points[self.points.len() - 1].value
    }

    /// Split into the first `at` points and the rest; both sides must be non-empty
    pub fn split_at(&self, at: usize) -> Result<(Series, Series)> {
        if at == 0 || at >= self.points.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "Split index {} must leave both sides of a {}-point series non-empty",
                at,
                self.points.len()
            )));
        }

        let (head, tail) = self.points.split_at(at);
        Ok((
            Series {
                points: head.to_vec(),
            },
            Series {
                points: tail.to_vec(),
            },
        ))
    }
}

impl TryFrom<Vec<ObservedPoint>> for Series {
    type Error = ForecastError;

    fn try_from(points: Vec<ObservedPoint>) -> Result<Self> {
        Series::new(points)
    }
}

impl From<Series> for Vec<ObservedPoint> {
    fn from(series: Series) -> Self {
        series.points
    }
}
