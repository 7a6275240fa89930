use crate::{AnalysisError, CompanySnapshot, RawStatement};
use async_trait::async_trait;

/// Source of raw quarterly statement tables (already fetched and
/// table-extracted; the core never touches the wire).
#[async_trait]
pub trait StatementProvider: Send + Sync {
    async fn quarterly_statement(&self, ticker: &str) -> Result<RawStatement, AnalysisError>;
}

/// Source of the company page snapshot (business description, concall
/// links, valuation ratios).
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    async fn company_snapshot(&self, ticker: &str) -> Result<CompanySnapshot, AnalysisError>;
}

/// Supplies the comparable-company set for a ticker. The aggregator
/// never embeds its own peer data.
#[async_trait]
pub trait PeerSetProvider: Send + Sync {
    async fn peer_tickers(&self, ticker: &str) -> Result<Vec<String>, AnalysisError>;
}
