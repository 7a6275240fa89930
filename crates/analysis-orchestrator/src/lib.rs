//! Pipeline orchestration: fetch → normalize → trend → risk/reward →
//! moat → narrative, with peer aggregation on the side.
//!
//! Only a primary-ticker fetch or normalization failure aborts a
//! request. The snapshot and peer collaborators fail softly: their
//! absence is logged and the result carries explicit unavailable
//! markers instead.

use std::sync::Arc;

use analysis_core::{
    AnalysisError, FullAnalysis, PeerSetProvider, SnapshotProvider, StatementProvider,
};

pub mod peers;

pub struct AnalysisOrchestrator {
    statements: Arc<dyn StatementProvider>,
    snapshots: Arc<dyn SnapshotProvider>,
    peer_sets: Arc<dyn PeerSetProvider>,
}

impl AnalysisOrchestrator {
    pub fn new(
        statements: Arc<dyn StatementProvider>,
        snapshots: Arc<dyn SnapshotProvider>,
        peer_sets: Arc<dyn PeerSetProvider>,
    ) -> Self {
        Self { statements, snapshots, peer_sets }
    }

    /// Run the full analysis for one ticker. An explicit peer list
    /// takes precedence over the configured peer-set provider.
    pub async fn analyze(
        &self,
        ticker: &str,
        peers_override: Option<Vec<String>>,
    ) -> Result<FullAnalysis, AnalysisError> {
        tracing::info!("Starting analysis for {}", ticker);

        let (statement_result, snapshot_result) = tokio::join!(
            self.statements.quarterly_statement(ticker),
            self.snapshots.company_snapshot(ticker),
        );

        let statement = statement_result?;
        let metrics = statement_normalizer::normalize(&statement)?;
        let trend = trend_analysis::summarize(&metrics);
        let verdict = risk_reward::classify(&trend);

        let snapshot = match snapshot_result {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("Company snapshot unavailable for {}: {}", ticker, e);
                None
            }
        };
        let profile = snapshot.as_ref().map(|s| s.profile.clone());
        let valuation = snapshot.as_ref().map(|s| risk_reward::valuation::classify(s.ratios));

        let description = profile.as_ref().and_then(|p| p.description.as_deref());
        let moat = moat_analysis::classify(&metrics, description);
        let report = narrative::synthesize(ticker, &metrics, &trend, &moat, &verdict);
        let operating_leverage = narrative::operating_leverage_notes(&trend);

        let peer_tickers = match peers_override {
            Some(peers) => peers,
            None => match self.peer_sets.peer_tickers(ticker).await {
                Ok(peers) => peers,
                Err(e) => {
                    tracing::warn!("Peer set unavailable for {}: {}", ticker, e);
                    Vec::new()
                }
            },
        };
        let peers = peers::aggregate(Arc::clone(&self.statements), ticker, &peer_tickers).await;

        Ok(FullAnalysis {
            ticker: ticker.to_string(),
            metrics,
            trend,
            operating_leverage,
            risk_reward: verdict,
            peers,
            profile,
            valuation,
            moat,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{
        CompanyProfile, CompanySnapshot, PeerVerdict, RawRow, RawStatement, RecommendedAction,
        ValuationRatios, ValuationVerdict,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;

    fn statement(sales: &[i64], margin_pct: i64) -> RawStatement {
        let values = |scale: i64| -> Vec<String> {
            sales.iter().map(|s| (s * scale / 100).to_string()).collect()
        };
        RawStatement {
            periods: (1..=sales.len()).map(|i| format!("Q{}", i)).collect(),
            rows: vec![
                RawRow { label: "Sales\u{a0}+".into(), values: values(100) },
                RawRow { label: "Operating Profit".into(), values: values(margin_pct) },
                RawRow { label: "Net Profit\u{a0}+".into(), values: values(margin_pct / 2) },
            ],
        }
    }

    struct FakeProviders {
        statements: HashMap<String, RawStatement>,
        snapshot: Option<CompanySnapshot>,
        peers: Vec<String>,
    }

    #[async_trait]
    impl StatementProvider for FakeProviders {
        async fn quarterly_statement(&self, ticker: &str) -> Result<RawStatement, AnalysisError> {
            self.statements
                .get(ticker)
                .cloned()
                .ok_or_else(|| AnalysisError::Fetch(format!("no data for {}", ticker)))
        }
    }

    #[async_trait]
    impl SnapshotProvider for FakeProviders {
        async fn company_snapshot(&self, _ticker: &str) -> Result<CompanySnapshot, AnalysisError> {
            self.snapshot
                .clone()
                .ok_or_else(|| AnalysisError::Fetch("snapshot down".into()))
        }
    }

    #[async_trait]
    impl PeerSetProvider for FakeProviders {
        async fn peer_tickers(&self, _ticker: &str) -> Result<Vec<String>, AnalysisError> {
            Ok(self.peers.clone())
        }
    }

    fn orchestrator(providers: FakeProviders) -> AnalysisOrchestrator {
        let shared = Arc::new(providers);
        AnalysisOrchestrator::new(shared.clone(), shared.clone(), shared)
    }

    fn growing_sales() -> Vec<i64> {
        vec![1000, 1000, 1000, 1000, 1200, 1200, 1200, 1200]
    }

    #[tokio::test]
    async fn test_full_pipeline_with_snapshot() {
        let mut statements = HashMap::new();
        statements.insert("ACME".to_string(), statement(&growing_sales(), 25));
        let providers = FakeProviders {
            statements,
            snapshot: Some(CompanySnapshot {
                profile: CompanyProfile {
                    description: Some("The largest maker of anvils".into()),
                    concalls: vec![],
                },
                ratios: ValuationRatios { pe: Some(12.0), ..Default::default() },
            }),
            peers: vec![],
        };

        let result = orchestrator(providers).analyze("ACME", None).await.unwrap();
        assert_eq!(result.metrics.len(), 8);
        let growth = result.trend.average_yoy_sales_growth.unwrap();
        assert!((growth - 20.0).abs() < 1e-9);
        assert_eq!(result.valuation.unwrap().verdict, ValuationVerdict::Cheap);
        assert_eq!(result.report.recommended_action, RecommendedAction::HoldOrBuy);
        assert_eq!(result.operating_leverage.len(), 3);
    }

    #[tokio::test]
    async fn test_snapshot_failure_is_soft() {
        let mut statements = HashMap::new();
        statements.insert("ACME".to_string(), statement(&growing_sales(), 25));
        let providers = FakeProviders { statements, snapshot: None, peers: vec![] };

        let result = orchestrator(providers).analyze("ACME", None).await.unwrap();
        assert!(result.profile.is_none());
        assert!(result.valuation.is_none());
    }

    #[tokio::test]
    async fn test_primary_fetch_failure_aborts() {
        let providers = FakeProviders {
            statements: HashMap::new(),
            snapshot: None,
            peers: vec![],
        };
        let err = orchestrator(providers).analyze("GHOST", None).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Fetch(_)));
    }

    struct DownPeerSet;

    #[async_trait]
    impl PeerSetProvider for DownPeerSet {
        async fn peer_tickers(&self, _ticker: &str) -> Result<Vec<String>, AnalysisError> {
            Err(AnalysisError::Fetch("peer discovery down".into()))
        }
    }

    #[tokio::test]
    async fn test_peer_set_failure_is_soft() {
        let mut statements = HashMap::new();
        statements.insert("ACME".to_string(), statement(&growing_sales(), 25));
        let providers = Arc::new(FakeProviders { statements, snapshot: None, peers: vec![] });
        let orchestrator = AnalysisOrchestrator::new(
            providers.clone(),
            providers,
            Arc::new(DownPeerSet),
        );

        let result = orchestrator.analyze("ACME", None).await.unwrap();
        assert!(result.peers.is_empty());
        // The rest of the analysis is untouched by the failed collaborator
        assert_eq!(result.metrics.len(), 8);
        assert_eq!(result.operating_leverage.len(), 3);
    }

    #[tokio::test]
    async fn test_peer_isolation_and_ordering() {
        let mut statements = HashMap::new();
        statements.insert("ACME".to_string(), statement(&growing_sales(), 25));
        statements.insert("BETA".to_string(), statement(&growing_sales(), 30));
        // GAMMA's statement lacks Net Profit
        let mut broken = statement(&growing_sales(), 25);
        broken.rows.pop();
        statements.insert("GAMMA".to_string(), broken);
        statements.insert("DELTA".to_string(), statement(&growing_sales(), 10));

        let providers = FakeProviders {
            statements,
            snapshot: None,
            peers: vec!["DELTA".into(), "GAMMA".into(), "BETA".into()],
        };

        let result = orchestrator(providers).analyze("ACME", None).await.unwrap();
        let tickers: Vec<&str> = result.peers.iter().map(|p| p.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["BETA", "DELTA", "GAMMA"]);

        let gamma = &result.peers[2];
        assert_eq!(gamma.risk_reward_verdict, PeerVerdict::NotAvailable);
        assert_eq!(gamma.sales_growth, None);

        let beta = &result.peers[0];
        assert_ne!(beta.risk_reward_verdict, PeerVerdict::NotAvailable);
        assert_eq!(beta.ebitda_margin, Some(30.0));
    }

    #[tokio::test]
    async fn test_peers_override_and_primary_excluded() {
        let mut statements = HashMap::new();
        statements.insert("ACME".to_string(), statement(&growing_sales(), 25));
        statements.insert("BETA".to_string(), statement(&growing_sales(), 30));
        let providers = FakeProviders {
            statements,
            snapshot: None,
            peers: vec!["BETA".into()],
        };

        let result = orchestrator(providers)
            .analyze("ACME", Some(vec!["ACME".into(), "BETA".into()]))
            .await
            .unwrap();
        let tickers: Vec<&str> = result.peers.iter().map(|p| p.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["BETA"]);
    }

    #[tokio::test]
    async fn test_idempotent_output() {
        let mut statements = HashMap::new();
        statements.insert("ACME".to_string(), statement(&growing_sales(), 25));
        statements.insert("BETA".to_string(), statement(&growing_sales(), 30));
        statements.insert("DELTA".to_string(), statement(&growing_sales(), 10));
        let providers = FakeProviders {
            statements,
            snapshot: None,
            peers: vec!["BETA".into(), "DELTA".into()],
        };
        let orchestrator = orchestrator(providers);

        let first = orchestrator.analyze("ACME", None).await.unwrap();
        let second = orchestrator.analyze("ACME", None).await.unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap(),
        );
    }
}
