//! Peer aggregation: the single-company path re-run per peer, with
//! per-peer failure isolation. One peer failing must never cancel or
//! block the others; its row simply reads NOT_AVAILABLE.

use std::sync::Arc;

use analysis_core::{AnalysisError, PeerRow, PeerVerdict, StatementProvider, VerdictCategory};
use tokio::task::JoinSet;

/// Analyze every peer concurrently and assemble the ranking table.
/// Rows are sorted by ticker so completion order never shows in the
/// output. The primary ticker is excluded from its own peer table.
pub async fn aggregate(
    statements: Arc<dyn StatementProvider>,
    ticker: &str,
    peer_tickers: &[String],
) -> Vec<PeerRow> {
    let mut tasks = JoinSet::new();

    for peer in peer_tickers {
        if peer.eq_ignore_ascii_case(ticker) {
            continue;
        }
        let provider = Arc::clone(&statements);
        let peer = peer.clone();
        tasks.spawn(async move {
            match analyze_peer(provider.as_ref(), &peer).await {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!("Peer {} unavailable: {}", peer, e);
                    unavailable_row(&peer)
                }
            }
        });
    }

    let mut rows = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(row) => rows.push(row),
            Err(e) => tracing::warn!("Peer task failed to join: {}", e),
        }
    }

    rows.sort_by(|a, b| a.ticker.cmp(&b.ticker));
    rows
}

/// Normalizer → trend → classifier for one peer. Signals come from the
/// peer's latest raw figures (most recent margins and the most recent
/// year-over-year growth point); the verdict from the averaged
/// classifier, same as the primary path.
async fn analyze_peer(
    provider: &dyn StatementProvider,
    peer: &str,
) -> Result<PeerRow, AnalysisError> {
    let raw = provider.quarterly_statement(peer).await?;
    let metrics = statement_normalizer::normalize(&raw)?;
    let trend = trend_analysis::summarize(&metrics);
    let verdict = risk_reward::classify(&trend);

    let sales_growth = trend_analysis::latest_yoy_sales_growth(&metrics);
    let latest = metrics.last();
    let ebitda_margin = latest.and_then(|m| m.ebitda_margin);
    let pat_margin = latest.and_then(|m| m.pat_margin);

    Ok(PeerRow {
        ticker: peer.to_string(),
        sales_growth,
        ebitda_margin,
        pat_margin,
        growth_signal: sales_growth.map(risk_reward::growth_signal),
        margin_signal: ebitda_margin.map(risk_reward::margin_signal),
        risk_reward_verdict: match verdict.category {
            VerdictCategory::Strong => PeerVerdict::Strong,
            VerdictCategory::Balanced => PeerVerdict::Balanced,
            VerdictCategory::Weak => PeerVerdict::Weak,
        },
    })
}

fn unavailable_row(peer: &str) -> PeerRow {
    PeerRow {
        ticker: peer.to_string(),
        sales_growth: None,
        ebitda_margin: None,
        pat_margin: None,
        growth_signal: None,
        margin_signal: None,
        risk_reward_verdict: PeerVerdict::NotAvailable,
    }
}
