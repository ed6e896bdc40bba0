//! Multiplicative seasonal decomposition

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Seasonal indices for one period length.
///
/// `normalized_factors` has `period_length` entries averaging 1.0. Slot `i`
/// applies to every series index with `index % period_length == i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalProfile {
    period_length: usize,
    normalized_factors: Vec<f64>,
}

impl SeasonalProfile {
    /// Profile that leaves every value unchanged
    pub fn identity(period_length: usize) -> Result<Self> {
        check_period(period_length)?;
        Ok(Self {
            period_length,
            normalized_factors: vec![1.0; period_length],
        })
    }

    /// Compute seasonal indices from the series values.
    ///
    /// Values are grouped by `index % period`, each group is averaged, and
    /// the averages are divided by their own mean. Seasonality is best
    /// effort: fewer than `period` values, or an all-zero series, yields the
    /// identity profile instead of an error.
    pub fn compute(values: &[f64], period_length: usize) -> Result<Self> {
        check_period(period_length)?;

        if values.len() < period_length {
            debug!(
                period_length,
                len = values.len(),
                "series shorter than one season, using identity profile"
            );
            return Self::identity(period_length);
        }

        let mut sums = vec![0.0; period_length];
        let mut counts = vec![0usize; period_length];
        for (i, &value) in values.iter().enumerate() {
            sums[i % period_length] += value;
            counts[i % period_length] += 1;
        }

        let averages: Vec<f64> = sums
            .iter()
            .zip(&counts)
            .map(|(sum, &count)| sum / count as f64)
            .collect();
        let overall = averages.iter().sum::<f64>() / period_length as f64;

        if overall <= 0.0 {
            debug!(period_length, "series has no volume, using identity profile");
            return Self::identity(period_length);
        }

        Ok(Self {
            period_length,
            normalized_factors: averages.iter().map(|avg| avg / overall).collect(),
        })
    }

    pub fn period_length(&self) -> usize {
        self.period_length
    }

    pub fn normalized_factors(&self) -> &[f64] {
        &self.normalized_factors
    }

    /// Factor for a series index (observed or future)
    pub fn factor(&self, index: usize) -> f64 {
        self.normalized_factors[index % self.period_length]
    }

    pub fn is_identity(&self) -> bool {
        self.normalized_factors.iter().all(|&f| f == 1.0)
    }

    /// Remove the seasonal effect from the value at `index`.
    ///
    /// A zero factor carries no information, so the value is returned as is.
    /// Such a slot only ever saw zeros and [`reseasonalize`](Self::reseasonalize)
    /// maps it back to 0; the round trip holds for non-zero factors only.
    pub fn deseasonalize(&self, value: f64, index: usize) -> f64 {
        let factor = self.factor(index);
        if factor == 0.0 {
            value
        } else {
            value / factor
        }
    }

    /// Re-apply the seasonal effect for `index`; a zero-factor slot yields 0
    pub fn reseasonalize(&self, value: f64, index: usize) -> f64 {
        value * self.factor(index)
    }

    /// De-seasonalize a whole series, index by index
    pub fn deseasonalize_series(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| self.deseasonalize(v, i))
            .collect()
    }
}

fn check_period(period_length: usize) -> Result<()> {
    if period_length == 0 {
        return Err(ForecastError::InvalidParameter(
            "Seasonal period length must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weekly_pattern() {
        // Two weeks where weekends sell double
        let week = [100.0, 100.0, 100.0, 100.0, 100.0, 200.0, 200.0];
        let values: Vec<f64> = week.iter().chain(week.iter()).copied().collect();

        let profile = SeasonalProfile::compute(&values, 7).unwrap();
        let factors = profile.normalized_factors();

        let mean = factors.iter().sum::<f64>() / 7.0;
        assert_relative_eq!(mean, 1.0, epsilon = 1e-9);
        assert_relative_eq!(factors[5] / factors[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(profile.factor(12), factors[5]);
    }

    #[test]
    fn test_uneven_groups() {
        // Index 0 and 4 fall in slot 0
        let profile = SeasonalProfile::compute(&[10.0, 20.0, 30.0, 40.0, 30.0], 4).unwrap();
        let factors = profile.normalized_factors();

        // Group averages 20, 20, 30, 40 with mean 27.5
        assert_relative_eq!(factors[0], 20.0 / 27.5, epsilon = 1e-12);
        assert_relative_eq!(factors[3], 40.0 / 27.5, epsilon = 1e-12);
    }

    #[test]
    fn test_short_series_is_identity() {
        let profile = SeasonalProfile::compute(&[1.0, 2.0, 3.0], 12).unwrap();
        assert!(profile.is_identity());
        assert_eq!(profile.normalized_factors().len(), 12);
    }

    #[test]
    fn test_zero_series_is_identity() {
        let profile = SeasonalProfile::compute(&[0.0; 8], 4).unwrap();
        assert!(profile.is_identity());
    }

    #[test]
    fn test_round_trip() {
        let values = [120.0, 80.0, 95.0, 140.0, 60.0, 110.0, 100.0, 130.0];
        let profile = SeasonalProfile::compute(&values, 4).unwrap();

        for (i, &v) in values.iter().enumerate() {
            let back = profile.reseasonalize(profile.deseasonalize(v, i), i);
            assert_relative_eq!(back, v, epsilon = 1e-9);
        }

        let flattened = profile.deseasonalize_series(&values);
        assert_eq!(flattened.len(), values.len());
    }

    #[test]
    fn test_closed_slot_forecasts_zero() {
        // Slot 3 is a day the shop never opens
        let values = [10.0, 20.0, 30.0, 0.0, 10.0, 20.0, 30.0, 0.0];
        let profile = SeasonalProfile::compute(&values, 4).unwrap();

        assert_eq!(profile.factor(3), 0.0);
        assert_eq!(profile.deseasonalize(50.0, 3), 50.0);
        assert_eq!(profile.reseasonalize(profile.deseasonalize(50.0, 3), 3), 0.0);

        for index in 0..3 {
            let back = profile.reseasonalize(profile.deseasonalize(50.0, index), index);
            assert_relative_eq!(back, 50.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(SeasonalProfile::compute(&[1.0], 0).is_err());
        assert!(SeasonalProfile::identity(0).is_err());
    }
}
