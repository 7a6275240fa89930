//! Trend analyzer: year-over-year growth and dispersion statistics over
//! the normalized quarterly series.
//!
//! Everything here fails softly: too little history yields `None`
//! fields, never an error. A newly listed company with three quarters
//! of data is an expected input, not a fault.

use analysis_core::{DerivedMetrics, TrendSummary};

/// Quarters between a period and its year-ago comparison point.
const YOY_LAG: usize = 4;

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation; `None` when fewer than 2 values.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Year-over-year growth points: `(v[i] / v[i-4] - 1) * 100` for every
/// i ≥ 4 where both endpoints exist and the base is positive.
fn yoy_growth_points(metrics: &[DerivedMetrics]) -> Vec<f64> {
    (YOY_LAG..metrics.len())
        .filter_map(|i| {
            let current = metrics[i].sales?;
            let base = metrics[i - YOY_LAG].sales.filter(|&b| b > 0.0)?;
            Some((current / base - 1.0) * 100.0)
        })
        .collect()
}

/// The most recent single YoY growth point, for consumers that want
/// the latest figure rather than the trailing average.
pub fn latest_yoy_sales_growth(metrics: &[DerivedMetrics]) -> Option<f64> {
    yoy_growth_points(metrics).last().copied()
}

fn collect<F>(metrics: &[DerivedMetrics], field: F) -> Vec<f64>
where
    F: Fn(&DerivedMetrics) -> Option<f64>,
{
    metrics.iter().filter_map(field).collect()
}

/// Summarize a normalized series: average YoY sales growth (undefined
/// below 5 periods), margin means over available entries, and PAT
/// margin volatility.
pub fn summarize(metrics: &[DerivedMetrics]) -> TrendSummary {
    let average_yoy_sales_growth = if metrics.len() <= YOY_LAG {
        None
    } else {
        mean(&yoy_growth_points(metrics))
    };

    TrendSummary {
        average_yoy_sales_growth,
        average_ebitda_margin: mean(&collect(metrics, |m| m.ebitda_margin)),
        average_pat_margin: mean(&collect(metrics, |m| m.pat_margin)),
        pat_margin_volatility: population_std_dev(&collect(metrics, |m| m.pat_margin)),
    }
}
