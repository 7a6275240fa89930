//! Moat classifier: margin stability, absolute profit scale, and
//! business-description leadership markers combine into a qualitative
//! moat verdict. Each signal is optional; missing inputs simply
//! contribute no note.

use analysis_core::{DerivedMetrics, Finding, MoatCategory, MoatVerdict};
use trend_analysis::{mean, population_std_dev};

/// Average EBITDA margin a stability note requires.
const STABLE_MARGIN_FLOOR: f64 = 20.0;
/// EBITDA margin volatility a stability note tolerates.
const MARGIN_VOLATILITY_CEILING: f64 = 2.0;
/// Average PAT (statement currency units) a scale note requires.
const PROFIT_SCALE_FLOOR: f64 = 1000.0;

/// Case-insensitive substrings marking claimed market leadership.
const LEADERSHIP_MARKERS: &[&str] = &["largest", "2nd", "#2", "market leader", "no. 1"];

fn has_leadership_marker(description: &str) -> bool {
    let text = description.to_lowercase();
    LEADERSHIP_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Combine the three moat signals over the normalized series and the
/// optional business description. Two or more notes → Strong, one →
/// Moderate, none → Weak.
pub fn classify(metrics: &[DerivedMetrics], description: Option<&str>) -> MoatVerdict {
    let mut notes = Vec::new();

    let ebitda_margins: Vec<f64> = metrics.iter().filter_map(|m| m.ebitda_margin).collect();
    if let (Some(avg), Some(sd)) = (mean(&ebitda_margins), population_std_dev(&ebitda_margins)) {
        if avg > STABLE_MARGIN_FLOOR && sd < MARGIN_VOLATILITY_CEILING {
            notes.push(Finding::new("Consistently strong EBITDA margins", avg));
        }
    }

    let pats: Vec<f64> = metrics.iter().filter_map(|m| m.pat).collect();
    if let Some(avg_pat) = mean(&pats) {
        if avg_pat > PROFIT_SCALE_FLOOR {
            notes.push(Finding::new("Sizable profits provide stability", avg_pat));
        }
    }

    if description.is_some_and(has_leadership_marker) {
        notes.push(Finding::qualitative("Market leadership suggests structural moat"));
    }

    let category = match notes.len() {
        0 => MoatCategory::Weak,
        1 => MoatCategory::Moderate,
        _ => MoatCategory::Strong,
    };

    MoatVerdict { notes, category }
}
