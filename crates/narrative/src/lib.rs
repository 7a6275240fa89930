//! Narrative synthesizer: growth phase, PAT growth, and the final
//! recommendation, plus the rendered plain-language summary.
//!
//! All decisions are made over enums; text is produced as a final
//! rendering step and nothing ever parses rendered text to recover
//! state.

use analysis_core::{
    DerivedMetrics, FinalReport, GrowthPhase, MoatCategory, MoatVerdict, RecommendedAction,
    RiskRewardVerdict, TrendSummary, VerdictCategory,
};

/// Ordered phase bands. The 3..=8 band resolves to Mature by exclusion;
/// boundaries are strict (>15, >8, <3), so exactly 15 is Scaling and
/// exactly 8 or 3 is Mature. Unavailable growth falls through to the
/// default band.
pub fn classify_phase(average_yoy_sales_growth: Option<f64>) -> GrowthPhase {
    match average_yoy_sales_growth {
        Some(g) if g > 15.0 => GrowthPhase::EarlyGrowth,
        Some(g) if g > 8.0 => GrowthPhase::Scaling,
        Some(g) if g < 3.0 => GrowthPhase::Declining,
        _ => GrowthPhase::Mature,
    }
}

/// First-to-last PAT growth in percent. Undefined when either endpoint
/// is missing or the base is not positive — surfaced as "not
/// available", never an error.
pub fn pat_growth(metrics: &[DerivedMetrics]) -> Option<f64> {
    let first = metrics.first()?.pat.filter(|&p| p > 0.0)?;
    let last = metrics.last()?.pat?;
    Some((last - first) / first * 100.0)
}

/// The deterministic decision rule: a strong moat with a balanced or
/// strong risk/reward reads Hold/Buy, an explicit weak moat reads
/// Avoid, everything else falls back to Watch.
pub fn recommend(moat: MoatCategory, risk_reward: VerdictCategory) -> RecommendedAction {
    if moat == MoatCategory::Strong
        && matches!(risk_reward, VerdictCategory::Balanced | VerdictCategory::Strong)
    {
        RecommendedAction::HoldOrBuy
    } else if moat == MoatCategory::Weak {
        RecommendedAction::Avoid
    } else {
        RecommendedAction::Watch
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => "not available".to_string(),
    }
}

fn phase_label(phase: GrowthPhase) -> &'static str {
    match phase {
        GrowthPhase::EarlyGrowth => "Early Growth",
        GrowthPhase::Scaling => "Scaling",
        GrowthPhase::Mature => "Mature",
        GrowthPhase::Declining => "Declining",
    }
}

fn moat_label(category: MoatCategory) -> &'static str {
    match category {
        MoatCategory::Strong => "Strong moat",
        MoatCategory::Moderate => "Moderate moat",
        MoatCategory::Weak => "Weak moat",
    }
}

fn risk_reward_label(category: VerdictCategory) -> &'static str {
    match category {
        VerdictCategory::Strong => "Strong risk-reward",
        VerdictCategory::Balanced => "Balanced risk-reward",
        VerdictCategory::Weak => "Weak risk-reward",
    }
}

fn action_label(action: RecommendedAction) -> &'static str {
    match action {
        RecommendedAction::HoldOrBuy => "Hold / Selective Buy",
        RecommendedAction::Watch => "Watch",
        RecommendedAction::Avoid => "Avoid",
    }
}

/// Operating-leverage observations rendered from the trend summary,
/// with explicit markers where inputs are unavailable.
pub fn operating_leverage_notes(trend: &TrendSummary) -> Vec<String> {
    let volatility = match trend.pat_margin_volatility {
        Some(v) => format!("{:.2}", v),
        None => "not available".to_string(),
    };
    vec![
        format!(
            "Sales growth phase: {} (avg YoY {})",
            phase_label(classify_phase(trend.average_yoy_sales_growth)),
            fmt_pct(trend.average_yoy_sales_growth),
        ),
        format!("Average EBITDA margin: {}", fmt_pct(trend.average_ebitda_margin)),
        format!("PAT margin volatility: {}", volatility),
    ]
}

/// Build the final report: phase, growth figures, recommendation, and
/// the layman summary.
pub fn synthesize(
    ticker: &str,
    metrics: &[DerivedMetrics],
    trend: &TrendSummary,
    moat: &MoatVerdict,
    risk_reward: &RiskRewardVerdict,
) -> FinalReport {
    let phase = classify_phase(trend.average_yoy_sales_growth);
    let sales_growth = trend.average_yoy_sales_growth;
    let pat_growth = pat_growth(metrics);
    let recommended_action = recommend(moat.category, risk_reward.category);

    let summary = format!(
        "{} is in the {} phase. Sales growth {} YoY, PAT growth {}. {}; {}. Suggested action: {}.",
        ticker,
        phase_label(phase),
        fmt_pct(sales_growth),
        fmt_pct(pat_growth),
        moat_label(moat.category),
        risk_reward_label(risk_reward.category),
        action_label(recommended_action),
    );

    FinalReport {
        ticker: ticker.to_string(),
        phase,
        sales_growth,
        pat_growth,
        moat_verdict: moat.category,
        risk_reward_verdict: risk_reward.category,
        recommended_action,
        summary,
    }
}
