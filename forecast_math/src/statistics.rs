//! Error statistics for forecast evaluation

use crate::{MathError, Result};

fn check_paired(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return Err(MathError::InvalidInput(format!(
            "Actual ({}) and predicted ({}) values must have the same non-zero length",
            actual.len(),
            predicted.len()
        )));
    }
    Ok(())
}

/// Signed errors `actual - predicted` per paired point
pub fn signed_errors(actual: &[f64], predicted: &[f64]) -> Result<Vec<f64>> {
    check_paired(actual, predicted)?;

    Ok(actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| a - p)
        .collect())
}

/// Mean Absolute Percentage Error, in percent.
///
/// Pairs whose actual value is exactly zero have no defined percentage error
/// and are left out of both the sum and the count. If no pair remains the
/// metric is undefined and an `InsufficientData` error is returned.
pub fn mean_absolute_percentage_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_paired(actual, predicted)?;

    let (sum, count) = actual
        .iter()
        .zip(predicted)
        .filter(|&(&a, _)| a != 0.0)
        .fold((0.0, 0usize), |(sum, count), (&a, &p)| {
            (sum + ((a - p) / a).abs(), count + 1)
        });

    if count == 0 {
        return Err(MathError::InsufficientData(
            "MAPE is undefined when every actual value is zero".to_string(),
        ));
    }

    Ok(sum / count as f64 * 100.0)
}

/// Root Mean Squared Error
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    root_mean_square(&signed_errors(actual, predicted)?)
}

/// Root of the mean of squares, `sqrt(mean(x^2))`.
///
/// Used as the standard deviation of errors that are taken to be zero-mean.
pub fn root_mean_square(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Root mean square of an empty sequence".to_string(),
        ));
    }

    let mean_square = values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64;
    Ok(mean_square.sqrt())
}

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Mean of an empty sequence".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}
