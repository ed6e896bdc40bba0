use forecast_math::MathError;
use sales_forecast::error::ForecastError;

#[test]
fn test_math_error_conversion() {
    let insufficient = ForecastError::from(MathError::InsufficientData("one point".to_string()));
    assert!(matches!(insufficient, ForecastError::InsufficientData(ref msg) if msg == "one point"));
    assert!(insufficient.is_insufficient_history());

    let invalid = ForecastError::from(MathError::InvalidInput("window 0".to_string()));
    assert!(matches!(invalid, ForecastError::InvalidParameter(_)));
    assert!(!invalid.is_insufficient_history());

    let calc = ForecastError::from(MathError::CalculationError("no variance".to_string()));
    assert!(matches!(calc, ForecastError::CalculationError(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter("alpha must be in (0, 1]".to_string());
    assert_eq!(error.to_string(), "Invalid parameter: alpha must be in (0, 1]");

    let error = ForecastError::InsufficientDataForValidation("4 training points".to_string());
    assert!(error.to_string().contains("validation"));
    assert!(error.is_insufficient_history());

    let error = ForecastError::InvalidSeries("duplicate timestamp 2024-01-01".to_string());
    assert!(error.to_string().starts_with("Invalid series"));
    assert!(!error.is_insufficient_history());
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error = ForecastError::from(json_error);

    assert!(matches!(error, ForecastError::Serialization(_)));
    assert!(error.to_string().contains("Serialization error"));
}
