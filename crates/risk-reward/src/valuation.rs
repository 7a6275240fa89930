//! Valuation check: P/E band classification over scraped ratios.

use analysis_core::{Valuation, ValuationRatios, ValuationVerdict};

const CHEAP_PE: f64 = 15.0;
const EXPENSIVE_PE: f64 = 25.0;

/// Classify the P/E into Cheap / Fair / Expensive bands; a missing P/E
/// yields NotAvailable rather than a guess. Other ratios are carried
/// through for display only.
pub fn classify(ratios: ValuationRatios) -> Valuation {
    let verdict = match ratios.pe {
        Some(pe) if pe < CHEAP_PE => ValuationVerdict::Cheap,
        Some(pe) if pe <= EXPENSIVE_PE => ValuationVerdict::Fair,
        Some(_) => ValuationVerdict::Expensive,
        None => ValuationVerdict::NotAvailable,
    };
    Valuation { ratios, verdict }
}
