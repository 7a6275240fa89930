//! HTTP collaborator for screener.in company pages: fetches the
//! consolidated quarterly statement and the company snapshot page, and
//! extracts the tabular data the core consumes. All network and markup
//! concerns live here; the analysis crates never see HTML.

use std::time::Duration;

use analysis_core::{
    AnalysisError, CompanyProfile, CompanySnapshot, RawStatement, SnapshotProvider,
    StatementProvider,
};
use async_trait::async_trait;
use reqwest::Client;

pub mod parse;

const DEFAULT_BASE_URL: &str = "https://www.screener.in";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; QuarterScope/0.1)";

#[derive(Clone)]
pub struct ScreenerClient {
    client: Client,
    base_url: String,
}

impl ScreenerClient {
    /// Base URL and timeout are env-overridable (`SCREENER_BASE_URL`,
    /// `HTTP_TIMEOUT_SECS`) so tests and mirrors can redirect the
    /// client without code changes.
    pub fn new() -> Self {
        let base_url = std::env::var("SCREENER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs: u64 = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        Self::with_base_url(base_url, Duration::from_secs(timeout_secs))
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, base_url: base_url.into() }
    }

    async fn fetch_page(&self, path: &str) -> Result<String, AnalysisError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AnalysisError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalysisError::Fetch(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AnalysisError::Fetch(e.to_string()))
    }
}

impl Default for ScreenerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatementProvider for ScreenerClient {
    async fn quarterly_statement(&self, ticker: &str) -> Result<RawStatement, AnalysisError> {
        let html = self
            .fetch_page(&format!("/company/{}/consolidated/", ticker))
            .await?;
        parse::quarters_table(&html)
    }
}

#[async_trait]
impl SnapshotProvider for ScreenerClient {
    async fn company_snapshot(&self, ticker: &str) -> Result<CompanySnapshot, AnalysisError> {
        let html = self.fetch_page(&format!("/company/{}/", ticker)).await?;
        Ok(CompanySnapshot {
            profile: CompanyProfile {
                description: parse::about(&html),
                concalls: parse::concall_links(&html, &self.base_url),
            },
            ratios: parse::valuation_ratios(&html),
        })
    }
}
