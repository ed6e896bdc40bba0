//! Forecast a month of daily branch sales and print the report.
//!
//! Run with `cargo run -p sales_forecast --example basic_forecast`.

use sales_forecast::insights::{prediction_change, smoothed_trend};
use sales_forecast::{
    aggregate_branches, ForecastConfig, ForecastEngine, Granularity, PreprocessOptions,
    RawObservation, RawValue,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Two branches, weekend peaks; the second branch reports totals as strings
    let mut raw = Vec::new();
    for day in 1..=28u32 {
        let weekend = matches!(day % 7, 6 | 0);
        let base = if weekend { 1800.0 } else { 1200.0 };
        let date = format!("2024-02-{:02}", day);

        raw.push(RawObservation::number(date.clone(), base + day as f64 * 5.0));
        raw.push(RawObservation::new(
            date,
            Some(RawValue::Text(format!("{:.2}", base * 0.5))),
        ));
    }

    let series = aggregate_branches(&raw, &PreprocessOptions::default())?;
    info!(points = series.len(), "aggregated all branches");

    let config = ForecastConfig::from_json_str(r#"{"horizon": 7}"#)?;
    let engine = ForecastEngine::new(config)?;
    let report = engine.run(&series, Granularity::Daily)?;

    println!("Forecast ({}):", report.granularity);
    for point in &report.forecasts {
        println!(
            "  {}  {:>8.0}  [{:>8.0}, {:>8.0}]  MA={} ES={} AR={} LINEAR={}",
            point.timestamp,
            point.value,
            point.lower_bound,
            point.upper_bound,
            point.model_breakdown.moving_average,
            point.model_breakdown.exponential_smoothing,
            point.model_breakdown.autoregressive,
            point.model_breakdown.linear_trend,
        );
    }

    let validation = &report.validation;
    println!("Backtest:");
    println!("  MAPE:     {:.2}%", validation.mape);
    println!("  RMSE:     {:.2}", validation.rmse);
    println!("  Accuracy: {:.2}%", validation.accuracy_score);

    println!(
        "Trend: {}% (smoothed), next period {}%",
        smoothed_trend(&series.values(), 3),
        prediction_change(&series, &report.forecasts)
    );

    println!("{}", report.to_json()?);

    Ok(())
}
