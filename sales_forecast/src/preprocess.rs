//! Series preprocessing: turns raw query rows into a validated [`Series`]

use crate::data::{ObservedPoint, Series};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A raw total as it arrives from an aggregation query.
///
/// SQL `SUM` over a numeric column is frequently serialized as a string, so
/// both JSON numbers and numeric strings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn as_number(&self) -> Option<f64> {
        let value = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// One row of a raw series: a date-like string and a possibly missing total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub date: String,
    #[serde(alias = "value")]
    pub total: Option<RawValue>,
}

impl RawObservation {
    pub fn new(date: impl Into<String>, total: Option<RawValue>) -> Self {
        Self {
            date: date.into(),
            total,
        }
    }

    pub fn number(date: impl Into<String>, total: f64) -> Self {
        Self::new(date, Some(RawValue::Number(total)))
    }
}

/// Opt-ins for repairing raw data instead of rejecting it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    /// Treat missing or unparseable totals as zero
    pub zero_fill_missing: bool,
    /// Treat negative totals as zero
    pub clamp_negative: bool,
}

/// Validate and normalize a raw series.
///
/// Rows are sorted by date; two rows on the same date are an error.
pub fn preprocess(raw: &[RawObservation], options: &PreprocessOptions) -> Result<Series> {
    normalize(raw, options).map_err(log_rejection)
}

/// Combine rows from several branches into one series.
///
/// Totals sharing a date are summed and each daily sum is rounded to whole
/// currency units, as the "all branches" view reports them.
pub fn aggregate_branches(raw: &[RawObservation], options: &PreprocessOptions) -> Result<Series> {
    aggregate(raw, options).map_err(log_rejection)
}

fn normalize(raw: &[RawObservation], options: &PreprocessOptions) -> Result<Series> {
    let mut points = raw
        .iter()
        .map(|row| coerce_row(row, options))
        .collect::<Result<Vec<_>>>()?;

    points.sort_by_key(|p| p.timestamp);

    if let Some(pair) = points
        .windows(2)
        .find(|pair| pair[0].timestamp == pair[1].timestamp)
    {
        return Err(ForecastError::InvalidSeries(format!(
            "Duplicate timestamp {}",
            pair[0].timestamp
        )));
    }

    debug!(points = points.len(), "preprocessed raw series");
    Series::new(points)
}

fn aggregate(raw: &[RawObservation], options: &PreprocessOptions) -> Result<Series> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for row in raw {
        let point = coerce_row(row, options)?;
        *totals.entry(point.timestamp).or_insert(0.0) += point.value;
    }

    debug!(
        rows = raw.len(),
        dates = totals.len(),
        "aggregated branch totals"
    );
    Series::new(
        totals
            .into_iter()
            .map(|(timestamp, total)| ObservedPoint::new(timestamp, total.round()))
            .collect(),
    )
}

fn log_rejection(err: ForecastError) -> ForecastError {
    if let ForecastError::InvalidSeries(reason) = &err {
        warn!(%reason, "rejected raw series");
    }
    err
}

fn coerce_row(row: &RawObservation, options: &PreprocessOptions) -> Result<ObservedPoint> {
    let timestamp = parse_date(&row.date)?;

    let value = match row.total.as_ref().and_then(RawValue::as_number) {
        Some(v) if v < 0.0 && options.clamp_negative => 0.0,
        Some(v) if v < 0.0 => {
            return Err(ForecastError::InvalidSeries(format!(
                "Negative total {} on {}",
                v, timestamp
            )))
        }
        Some(v) => v,
        None if options.zero_fill_missing => 0.0,
        None => {
            return Err(ForecastError::InvalidSeries(format!(
                "Missing or invalid total on {}: {:?}",
                timestamp, row.total
            )))
        }
    };

    Ok(ObservedPoint::new(timestamp, value))
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; the time of day is dropped
fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| ForecastError::InvalidSeries(format!("Unparseable date: {:?}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(date: &str, total: &str) -> RawObservation {
        RawObservation::new(date, Some(RawValue::Text(total.to_string())))
    }

    #[test]
    fn test_sorts_and_coerces() {
        let raw = vec![
            text("2024-01-03", " 30.5 "),
            RawObservation::number("2024-01-01", 10.0),
            RawObservation::number("2024-01-02T08:30:00Z", 20.0),
        ];

        let series = preprocess(&raw, &PreprocessOptions::default()).unwrap();

        assert_eq!(series.values(), vec![10.0, 20.0, 30.5]);
        assert_eq!(
            series.last_timestamp(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_missing_values_fail_fast() {
        let raw = vec![
            RawObservation::number("2024-01-01", 10.0),
            RawObservation::new("2024-01-02", None),
        ];
        assert!(matches!(
            preprocess(&raw, &PreprocessOptions::default()),
            Err(ForecastError::InvalidSeries(_))
        ));

        let raw = vec![text("2024-01-01", "n/a")];
        assert!(preprocess(&raw, &PreprocessOptions::default()).is_err());
    }

    #[test]
    fn test_zero_fill_opt_in() {
        let raw = vec![
            RawObservation::number("2024-01-01", 10.0),
            RawObservation::new("2024-01-02", None),
            text("2024-01-03", "oops"),
        ];
        let options = PreprocessOptions {
            zero_fill_missing: true,
            ..Default::default()
        };

        let series = preprocess(&raw, &options).unwrap();
        assert_eq!(series.values(), vec![10.0, 0.0, 0.0]);
    }

    #[test]
    fn test_negative_values() {
        let raw = vec![RawObservation::number("2024-01-01", -5.0)];
        assert!(preprocess(&raw, &PreprocessOptions::default()).is_err());

        let options = PreprocessOptions {
            clamp_negative: true,
            ..Default::default()
        };
        assert_eq!(preprocess(&raw, &options).unwrap().values(), vec![0.0]);
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let raw = vec![
            RawObservation::number("2024-01-01", 10.0),
            RawObservation::number("2024-01-01T23:00:00Z", 11.0),
        ];
        assert!(matches!(
            preprocess(&raw, &PreprocessOptions::default()),
            Err(ForecastError::InvalidSeries(_))
        ));
    }

    #[test]
    fn test_bad_date_rejected() {
        let raw = vec![RawObservation::number("01/02/2024", 10.0)];
        assert!(matches!(
            preprocess(&raw, &PreprocessOptions::default()),
            Err(ForecastError::InvalidSeries(_))
        ));
    }

    #[test]
    fn test_aggregate_branches_sums_same_dates() {
        let raw = vec![
            RawObservation::number("2024-01-02", 5.4),
            RawObservation::number("2024-01-01", 10.0),
            text("2024-01-02", "4.4"),
            RawObservation::number("2024-01-01", 2.0),
        ];

        let series = aggregate_branches(&raw, &PreprocessOptions::default()).unwrap();
        assert_eq!(series.values(), vec![12.0, 10.0]);
    }

    #[test]
    fn test_raw_rows_from_json() {
        let json = r#"[
            {"date": "2024-02-01", "total": "125.50"},
            {"date": "2024-02-02", "total": 99},
            {"date": "2024-02-03", "value": 80}
        ]"#;
        let raw: Vec<RawObservation> = serde_json::from_str(json).unwrap();

        let series = preprocess(&raw, &PreprocessOptions::default()).unwrap();
        assert_eq!(series.values(), vec![125.5, 99.0, 80.0]);
    }
}
