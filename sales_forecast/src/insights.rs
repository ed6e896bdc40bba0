//! Business summaries reported next to the forecast

use crate::data::Series;
use crate::engine::ForecastPoint;
use forecast_math::statistics::mean;
use serde::{Deserialize, Serialize};

/// Period-over-period change of the last two totals, in whole percent.
///
/// Returns 0 for fewer than two points or a zero previous total.
pub fn percent_change(values: &[f64]) -> i64 {
    match values {
        [.., previous, latest] if *previous != 0.0 => {
            ((latest - previous) / previous * 100.0).round() as i64
        }
        _ => 0,
    }
}

/// Change of the trailing `window` mean against the window before it, in whole percent.
///
/// Less noisy than [`percent_change`]. Returns 0 when fewer than `2 * window`
/// points exist or the earlier mean is 0.
pub fn smoothed_trend(values: &[f64], window: usize) -> i64 {
    if window == 0 || values.len() < window * 2 {
        return 0;
    }

    let n = values.len();
    let (Ok(current), Ok(previous)) = (
        mean(&values[n - window..]),
        mean(&values[n - 2 * window..n - window]),
    ) else {
        return 0;
    };

    if previous == 0.0 {
        return 0;
    }
    ((current - previous) / previous * 100.0).round() as i64
}

/// Expected change from the last observed total to the first forecast, in whole percent.
///
/// Returns 0 unless both totals are positive.
pub fn prediction_change(series: &Series, forecasts: &[ForecastPoint]) -> i64 {
    let current = series.last_value();
    match forecasts.first() {
        Some(next) if current > 0.0 && next.value > 0.0 => {
            ((next.value - current) / current * 100.0).round() as i64
        }
        _ => 0,
    }
}

/// Profit figures derived from sales, purchase and expense totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitSummary {
    pub total_sales: f64,
    pub total_purchases: f64,
    pub total_expenses: f64,
    /// Sales minus purchases
    pub gross_profit: f64,
    /// Gross profit minus expenses
    pub net_profit: f64,
    /// Whole percent of sales
    pub gross_margin: i64,
    /// Whole percent of sales
    pub net_margin: i64,
}

impl ProfitSummary {
    /// Summarize the three series' totals.
    ///
    /// If any of the three is empty the whole summary is zero. With no sales
    /// the margins and profits are reported as 0.
    pub fn from_totals(sales: &[f64], purchases: &[f64], expenses: &[f64]) -> Self {
        if sales.is_empty() || purchases.is_empty() || expenses.is_empty() {
            return Self::default();
        }

        let total_sales: f64 = sales.iter().sum();
        let total_purchases: f64 = purchases.iter().sum();
        let total_expenses: f64 = expenses.iter().sum();

        if total_sales == 0.0 {
            return Self {
                total_sales,
                total_purchases,
                total_expenses,
                gross_profit: 0.0,
                net_profit: 0.0,
                gross_margin: 0,
                net_margin: 0,
            };
        }

        let gross_profit = total_sales - total_purchases;
        let net_profit = gross_profit - total_expenses;

        Self {
            total_sales,
            total_purchases,
            total_expenses,
            gross_profit,
            net_profit,
            gross_margin: (gross_profit / total_sales * 100.0).round() as i64,
            net_margin: (net_profit / total_sales * 100.0).round() as i64,
        }
    }
}

/// Stock above this total is flagged as overstocked
pub const HIGH_STOCK_THRESHOLD: f64 = 1000.0;
/// Stock below this total is flagged for restocking
pub const LOW_STOCK_THRESHOLD: f64 = 100.0;

/// Verdict on the total units in stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InventoryStatus {
    /// No inventory rows to judge
    Unknown,
    Overstocked,
    LowStock,
    Optimal,
}

impl InventoryStatus {
    pub fn message(self) -> &'static str {
        match self {
            InventoryStatus::Unknown => "Insufficient inventory data",
            InventoryStatus::Overstocked => {
                "High inventory levels detected - Consider running promotions"
            }
            InventoryStatus::LowStock => "Low inventory levels - Consider restocking soon",
            InventoryStatus::Optimal => "Inventory levels are optimal",
        }
    }

    /// True for the states that call for action
    pub fn is_warning(self) -> bool {
        matches!(self, InventoryStatus::Overstocked | InventoryStatus::LowStock)
    }
}

/// Classify the summed stock levels against the fixed thresholds
pub fn analyze_inventory(stock: &[f64]) -> InventoryStatus {
    if stock.is_empty() {
        return InventoryStatus::Unknown;
    }

    let total: f64 = stock.iter().sum();
    if total > HIGH_STOCK_THRESHOLD {
        InventoryStatus::Overstocked
    } else if total < LOW_STOCK_THRESHOLD {
        InventoryStatus::LowStock
    } else {
        InventoryStatus::Optimal
    }
}
