//! Risk/reward classifier: fixed thresholds over the trend summary
//! produce labeled strengths and risks plus a categorical verdict.

use analysis_core::{Finding, RiskRewardVerdict, SignalLevel, TrendSummary, VerdictCategory};

pub mod valuation;

/// Average EBITDA margin above this is a strength.
const EBITDA_MARGIN_THRESHOLD: f64 = 20.0;
/// Average PAT margin above this is a strength.
const PAT_MARGIN_THRESHOLD: f64 = 12.0;
/// Average YoY sales growth above this is a strength.
const SALES_GROWTH_THRESHOLD: f64 = 8.0;

struct Rule {
    value: Option<f64>,
    threshold: f64,
    strength: &'static str,
    risk: &'static str,
    unavailable: &'static str,
}

/// Apply the three threshold rules. A rule whose input is unavailable
/// (e.g. too few periods for YoY growth) is skipped and recorded as an
/// explicit insufficient-data risk; a missing value is never formatted
/// into finding text.
pub fn classify(trend: &TrendSummary) -> RiskRewardVerdict {
    let rules = [
        Rule {
            value: trend.average_ebitda_margin,
            threshold: EBITDA_MARGIN_THRESHOLD,
            strength: "Healthy EBITDA margin",
            risk: "Weak EBITDA margin",
            unavailable: "Insufficient data for EBITDA margin",
        },
        Rule {
            value: trend.average_pat_margin,
            threshold: PAT_MARGIN_THRESHOLD,
            strength: "Strong PAT margin",
            risk: "Weak PAT margin",
            unavailable: "Insufficient data for PAT margin",
        },
        Rule {
            value: trend.average_yoy_sales_growth,
            threshold: SALES_GROWTH_THRESHOLD,
            strength: "Good sales growth",
            risk: "Weak sales growth",
            unavailable: "Insufficient history for sales growth",
        },
    ];

    let mut strengths = Vec::new();
    let mut risks = Vec::new();

    for rule in rules {
        match rule.value {
            Some(v) if v > rule.threshold => strengths.push(Finding::new(rule.strength, v)),
            Some(v) => risks.push(Finding::new(rule.risk, v)),
            None => risks.push(Finding::unavailable(rule.unavailable)),
        }
    }

    // Missing-data flags count as risks: absent history must not read
    // as Strong.
    let category = if strengths.len() >= 2 && risks.is_empty() {
        VerdictCategory::Strong
    } else if risks.len() >= 2 {
        VerdictCategory::Weak
    } else {
        VerdictCategory::Balanced
    };

    RiskRewardVerdict { strengths, risks, category }
}

/// Peer-table signal over a raw sales-growth figure.
pub fn growth_signal(value: f64) -> SignalLevel {
    if value > 10.0 {
        SignalLevel::Strong
    } else if value > 5.0 {
        SignalLevel::Moderate
    } else {
        SignalLevel::Weak
    }
}

/// Peer-table signal over a raw margin figure.
pub fn margin_signal(value: f64) -> SignalLevel {
    if value > 20.0 {
        SignalLevel::Strong
    } else if value > 10.0 {
        SignalLevel::Moderate
    } else {
        SignalLevel::Weak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(ebitda: Option<f64>, pat: Option<f64>, growth: Option<f64>) -> TrendSummary {
        TrendSummary {
            average_yoy_sales_growth: growth,
            average_ebitda_margin: ebitda,
            average_pat_margin: pat,
            pat_margin_volatility: Some(1.0),
        }
    }

    #[test]
    fn test_all_strengths() {
        let verdict = classify(&trend(Some(25.0), Some(15.0), Some(10.0)));
        assert_eq!(verdict.strengths.len(), 3);
        assert_eq!(verdict.risks.len(), 0);
        assert_eq!(verdict.category, VerdictCategory::Strong);
        assert_eq!(verdict.strengths[0].value, Some(25.0));
    }

    #[test]
    fn test_all_risks() {
        let verdict = classify(&trend(Some(10.0), Some(5.0), Some(2.0)));
        assert_eq!(verdict.strengths.len(), 0);
        assert_eq!(verdict.risks.len(), 3);
        assert_eq!(verdict.category, VerdictCategory::Weak);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Exactly at threshold falls on the risk side
        let verdict = classify(&trend(Some(20.0), Some(12.0), Some(8.0)));
        assert_eq!(verdict.risks.len(), 3);
    }

    #[test]
    fn test_undefined_growth_becomes_explicit_flag() {
        let verdict = classify(&trend(Some(25.0), Some(15.0), None));
        assert_eq!(verdict.strengths.len(), 2);
        assert_eq!(verdict.risks.len(), 1);
        let flag = &verdict.risks[0];
        assert_eq!(flag.label, "Insufficient history for sales growth");
        assert_eq!(flag.value, None);
        // Two strengths but one risk: balanced, not strong
        assert_eq!(verdict.category, VerdictCategory::Balanced);
    }

    #[test]
    fn test_mixed_is_balanced() {
        let verdict = classify(&trend(Some(25.0), Some(15.0), Some(2.0)));
        assert_eq!(verdict.category, VerdictCategory::Balanced);
    }

    #[test]
    fn test_peer_signals() {
        assert_eq!(growth_signal(10.1), SignalLevel::Strong);
        assert_eq!(growth_signal(10.0), SignalLevel::Moderate);
        assert_eq!(growth_signal(5.0), SignalLevel::Weak);
        assert_eq!(margin_signal(20.1), SignalLevel::Strong);
        assert_eq!(margin_signal(20.0), SignalLevel::Moderate);
        assert_eq!(margin_signal(10.0), SignalLevel::Weak);
    }
}
