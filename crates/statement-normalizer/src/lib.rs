//! Statement normalizer: raw tabular quarterly statement → typed
//! per-period metrics with derived margins.

use analysis_core::{AnalysisError, DerivedMetrics, RawStatement};

const SALES: &str = "Sales";
const OPERATING_PROFIT: &str = "Operating Profit";
const NET_PROFIT: &str = "Net Profit";

/// How many trailing periods to keep when the source supplies more.
const PERIOD_WINDOW: usize = 8;

/// Strip the encoding artifacts the source embeds in line-item labels:
/// non-breaking spaces, the trailing "+" expander marker, and stray
/// whitespace.
fn normalize_label(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if c == '\u{a0}' { ' ' } else { c })
        .collect();
    cleaned
        .trim()
        .trim_end_matches('+')
        .trim()
        .to_string()
}

/// Parse one table cell. Empty cells and dash placeholders are missing
/// values, not zeros. Thousands separators are tolerated.
fn parse_value(raw: &str) -> Option<f64> {
    let cleaned = raw.replace('\u{a0}', " ").replace(',', "");
    let trimmed = cleaned.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "--" {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Margin as a percentage, rounded to 2 decimals. Undefined (not zero)
/// when sales is missing, zero, or negative.
fn margin(profit: Option<f64>, sales: Option<f64>) -> Option<f64> {
    let sales = sales.filter(|&s| s > 0.0)?;
    let profit = profit?;
    Some(round2(profit / sales * 100.0))
}

fn find_row<'a>(statement: &'a RawStatement, label: &str) -> Result<&'a [String], AnalysisError> {
    statement
        .rows
        .iter()
        .find(|row| normalize_label(&row.label) == label)
        .map(|row| row.values.as_slice())
        .ok_or_else(|| AnalysisError::MissingLineItem(label.to_string()))
}

/// Convert a raw statement into per-period derived metrics over the most
/// recent 8 periods (fewer is fine). Fails only when a required line
/// item is absent. Pure function of the input table.
pub fn normalize(statement: &RawStatement) -> Result<Vec<DerivedMetrics>, AnalysisError> {
    let sales_row = find_row(statement, SALES)?;
    let ebitda_row = find_row(statement, OPERATING_PROFIT)?;
    let pat_row = find_row(statement, NET_PROFIT)?;

    let total = statement.periods.len();
    let start = total.saturating_sub(PERIOD_WINDOW);

    let mut metrics = Vec::with_capacity(total - start);
    for i in start..total {
        let sales = sales_row.get(i).map(String::as_str).and_then(parse_value);
        let ebitda = ebitda_row.get(i).map(String::as_str).and_then(parse_value);
        let pat = pat_row.get(i).map(String::as_str).and_then(parse_value);

        metrics.push(DerivedMetrics {
            period: statement.periods[i].clone(),
            sales,
            ebitda,
            pat,
            ebitda_margin: margin(ebitda, sales),
            pat_margin: margin(pat, sales),
        });
    }

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::RawRow;

    fn statement(periods: &[&str], rows: &[(&str, &[&str])]) -> RawStatement {
        RawStatement {
            periods: periods.iter().map(|p| p.to_string()).collect(),
            rows: rows
                .iter()
                .map(|(label, values)| RawRow {
                    label: label.to_string(),
                    values: values.iter().map(|v| v.to_string()).collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_noisy_labels_and_margins() {
        let s = statement(
            &["Jun 2024", "Sep 2024"],
            &[
                ("Sales\u{a0}+", &["200", "400"]),
                ("Operating Profit", &["50", "100"]),
                ("Net Profit\u{a0}+", &["30", "50"]),
            ],
        );
        let metrics = normalize(&s).unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].ebitda_margin, Some(25.0));
        assert_eq!(metrics[1].pat_margin, Some(12.5));
    }

    #[test]
    fn test_margin_rounds_to_two_decimals() {
        let s = statement(
            &["Q1"],
            &[("Sales", &["3"]), ("Operating Profit", &["1"]), ("Net Profit", &["2"])],
        );
        let metrics = normalize(&s).unwrap();
        assert_eq!(metrics[0].ebitda_margin, Some(33.33));
        assert_eq!(metrics[0].pat_margin, Some(66.67));
    }

    #[test]
    fn test_margin_undefined_on_zero_negative_or_missing_sales() {
        let s = statement(
            &["Q1", "Q2", "Q3"],
            &[
                ("Sales", &["0", "-10", ""]),
                ("Operating Profit", &["5", "5", "5"]),
                ("Net Profit", &["5", "5", "5"]),
            ],
        );
        let metrics = normalize(&s).unwrap();
        for row in &metrics {
            assert_eq!(row.ebitda_margin, None);
            assert_eq!(row.pat_margin, None);
        }
        // Profit figures survive even when margins are undefined
        assert_eq!(metrics[0].ebitda, Some(5.0));
        assert_eq!(metrics[2].sales, None);
    }

    #[test]
    fn test_missing_line_item_is_fatal() {
        let s = statement(&["Q1"], &[("Sales", &["10"]), ("Operating Profit", &["2"])]);
        match normalize(&s) {
            Err(AnalysisError::MissingLineItem(item)) => assert_eq!(item, "Net Profit"),
            other => panic!("expected MissingLineItem, got {:?}", other),
        }
    }

    #[test]
    fn test_keeps_most_recent_eight_periods() {
        let periods: Vec<String> = (1..=10).map(|i| format!("Q{}", i)).collect();
        let period_refs: Vec<&str> = periods.iter().map(String::as_str).collect();
        let values: Vec<String> = (1..=10).map(|i| (i * 100).to_string()).collect();
        let value_refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let s = statement(
            &period_refs,
            &[
                ("Sales", &value_refs),
                ("Operating Profit", &value_refs),
                ("Net Profit", &value_refs),
            ],
        );
        let metrics = normalize(&s).unwrap();
        assert_eq!(metrics.len(), 8);
        assert_eq!(metrics[0].period, "Q3");
        assert_eq!(metrics[7].period, "Q10");
        assert_eq!(metrics[0].sales, Some(300.0));
    }

    #[test]
    fn test_fewer_than_eight_periods_is_not_an_error() {
        let s = statement(
            &["Q1", "Q2"],
            &[
                ("Sales", &["1,200", "1,500"]),
                ("Operating Profit", &["240", "300"]),
                ("Net Profit", &["120", "150"]),
            ],
        );
        let metrics = normalize(&s).unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].sales, Some(1200.0));
        assert_eq!(metrics[1].ebitda_margin, Some(20.0));
    }
}
