use serde::{Deserialize, Serialize};

/// Raw tabular quarterly statement: rows are line items, columns are periods.
/// Values are kept as the source's strings; the normalizer parses them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStatement {
    /// Period labels, chronological, oldest first.
    pub periods: Vec<String>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRow {
    pub label: String,
    /// One value per period; missing cells are empty strings.
    pub values: Vec<String>,
}

/// Per-period derived metrics produced by the statement normalizer.
/// Margins are `None` (rendered "not available") whenever sales is
/// missing, zero, or negative — never coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub period: String,
    pub sales: Option<f64>,
    pub ebitda: Option<f64>,
    pub pat: Option<f64>,
    pub ebitda_margin: Option<f64>,
    pub pat_margin: Option<f64>,
}

/// Growth and dispersion statistics over the normalized series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    #[serde(rename = "averageYoYSalesGrowth")]
    pub average_yoy_sales_growth: Option<f64>,
    pub average_ebitda_margin: Option<f64>,
    pub average_pat_margin: Option<f64>,
    pub pat_margin_volatility: Option<f64>,
}

/// A labeled classifier finding carrying the numeric value that
/// triggered it, for explainability. `value` is `None` for findings
/// that flag missing inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub label: String,
    pub value: Option<f64>,
}

impl Finding {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self { label: label.into(), value: Some(value) }
    }

    pub fn unavailable(label: impl Into<String>) -> Self {
        Self { label: label.into(), value: None }
    }

    /// A purely qualitative finding: nothing was missing, there is
    /// just no number behind it.
    pub fn qualitative(label: impl Into<String>) -> Self {
        Self { label: label.into(), value: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictCategory {
    Strong,
    Balanced,
    Weak,
}

/// Risk/reward classification: labeled strengths and risks plus a
/// category derived from their counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRewardVerdict {
    pub strengths: Vec<Finding>,
    pub risks: Vec<Finding>,
    pub category: VerdictCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalLevel {
    Strong,
    Moderate,
    Weak,
}

/// Risk/reward outcome for one peer. A peer whose sub-analysis failed
/// is recorded as `NotAvailable` instead of aborting the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeerVerdict {
    Strong,
    Balanced,
    Weak,
    NotAvailable,
}

/// One row of the comparative peer ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerRow {
    pub ticker: String,
    pub sales_growth: Option<f64>,
    pub ebitda_margin: Option<f64>,
    pub pat_margin: Option<f64>,
    pub growth_signal: Option<SignalLevel>,
    pub margin_signal: Option<SignalLevel>,
    pub risk_reward_verdict: PeerVerdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoatCategory {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoatVerdict {
    pub notes: Vec<Finding>,
    pub category: MoatCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrowthPhase {
    EarlyGrowth,
    Scaling,
    Mature,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendedAction {
    HoldOrBuy,
    Watch,
    Avoid,
}

/// Final synthesized report with the plain-language summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    pub ticker: String,
    pub phase: GrowthPhase,
    pub sales_growth: Option<f64>,
    pub pat_growth: Option<f64>,
    pub moat_verdict: MoatCategory,
    pub risk_reward_verdict: VerdictCategory,
    pub recommended_action: RecommendedAction,
    pub summary: String,
}

/// Business description and recent concall links from the company page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub description: Option<String>,
    pub concalls: Vec<String>,
}

/// Valuation ratios scraped from the company page; any may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRatios {
    pub pe: Option<f64>,
    pub ev_ebitda: Option<f64>,
    pub ev_sales: Option<f64>,
    pub peg: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValuationVerdict {
    Cheap,
    Fair,
    Expensive,
    NotAvailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    pub ratios: ValuationRatios,
    pub verdict: ValuationVerdict,
}

/// Everything the snapshot collaborator extracts from one company page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySnapshot {
    pub profile: CompanyProfile,
    pub ratios: ValuationRatios,
}

/// The full nested result object for one analyze request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullAnalysis {
    pub ticker: String,
    pub metrics: Vec<DerivedMetrics>,
    pub trend: TrendSummary,
    pub operating_leverage: Vec<String>,
    pub risk_reward: RiskRewardVerdict,
    pub peers: Vec<PeerRow>,
    pub profile: Option<CompanyProfile>,
    pub valuation: Option<Valuation>,
    pub moat: MoatVerdict,
    pub report: FinalReport,
}
