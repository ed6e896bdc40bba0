//! Smoothing kernels
//!
//! Contains:
//! - Trailing Simple Moving Average
//! - Simple Exponential Smoothing

use crate::{MathError, Result};

/// Trailing simple moving average.
///
/// Produces one value per full window, so the output has
/// `values.len() - window + 1` entries. A series shorter than the window is
/// not an error: the result is empty and callers treat it as "no estimate".
pub fn simple_moving_average(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(MathError::InvalidInput(
            "Window must be greater than zero".to_string(),
        ));
    }

    if values.len() < window {
        return Ok(Vec::new());
    }

    let mut averages = Vec::with_capacity(values.len() - window + 1);
    let mut sum: f64 = values[..window].iter().sum();
    averages.push(sum / window as f64);

    // Slide the window one observation at a time
    for i in window..values.len() {
        sum += values[i] - values[i - window];
        averages.push(sum / window as f64);
    }

    Ok(averages)
}

/// Simple exponential smoothing.
///
/// `s[0] = x[0]`, `s[i] = alpha * x[i] + (1 - alpha) * s[i - 1]`.
pub fn exponential_smoothing(values: &[f64], alpha: f64) -> Result<Vec<f64>> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(MathError::InvalidInput(format!(
            "Alpha must be in (0, 1], got {}",
            alpha
        )));
    }

    let Some((&first, rest)) = values.split_first() else {
        return Err(MathError::InsufficientData(
            "Exponential smoothing needs at least one value".to_string(),
        ));
    };

    let mut smoothed = Vec::with_capacity(values.len());
    let mut level = first;
    smoothed.push(level);

    for &value in rest {
        level = alpha * value + (1.0 - alpha) * level;
        smoothed.push(level);
    }

    Ok(smoothed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sma_calculation() {
        let sma = simple_moving_average(&[2.0, 4.0, 6.0, 8.0], 3).unwrap();

        // (2 + 4 + 6) / 3 = 4, then the window slides: (4 + 6 + 8) / 3 = 6
        assert_eq!(sma, vec![4.0, 6.0]);
    }

    #[test]
    fn test_sma_under_window_is_empty() {
        assert!(simple_moving_average(&[10.0, 20.0], 3).unwrap().is_empty());
        assert!(simple_moving_average(&[], 1).unwrap().is_empty());
    }

    #[test]
    fn test_sma_rejects_zero_window() {
        assert!(matches!(
            simple_moving_average(&[1.0], 0),
            Err(MathError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_exponential_smoothing() {
        let smoothed = exponential_smoothing(&[100.0, 110.0, 90.0], 0.3).unwrap();

        assert_eq!(smoothed.len(), 3);
        assert_relative_eq!(smoothed[0], 100.0);
        assert_relative_eq!(smoothed[1], 103.0);
        // 0.3 * 90 + 0.7 * 103
        assert_relative_eq!(smoothed[2], 99.1, epsilon = 1e-12);
    }

    #[test]
    fn test_exponential_smoothing_alpha_one_tracks_input() {
        let values = [5.0, 7.0, 3.0];
        assert_eq!(exponential_smoothing(&values, 1.0).unwrap(), values.to_vec());
    }

    #[test]
    fn test_exponential_smoothing_validation() {
        assert!(exponential_smoothing(&[1.0], 0.0).is_err());
        assert!(exponential_smoothing(&[1.0], 1.5).is_err());
        assert!(matches!(
            exponential_smoothing(&[], 0.3),
            Err(MathError::InsufficientData(_))
        ));
    }
}
