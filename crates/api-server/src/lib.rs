//! HTTP surface: a single analyze endpoint plus health, wrapped in the
//! success/error envelope. Any error escaping the pipeline is caught
//! once here and converted to the error shape; the process never dies
//! on a request.

use std::sync::Arc;

use analysis_core::{AnalysisError, PeerSetProvider};
use analysis_orchestrator::AnalysisOrchestrator;
use axum::{routing::get, Json, Router};
use screener_client::ScreenerClient;
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

pub mod analyze_routes;

pub use analyze_routes::analyze_routes;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<AnalysisOrchestrator>,
}

/// Top-level response envelope: `{"status":"success","data":...}` or
/// `{"status":"error","message":...}`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Success { data: T },
    Error { message: String },
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }
}

/// Peer set configured via `PEER_TICKERS` (comma-separated). Requests
/// may still override it with an explicit peer list.
pub struct ConfiguredPeers {
    tickers: Vec<String>,
}

impl ConfiguredPeers {
    pub fn from_env() -> Self {
        Self::from_str(&std::env::var("PEER_TICKERS").unwrap_or_default())
    }

    pub fn from_str(raw: &str) -> Self {
        let tickers = raw
            .split(',')
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { tickers }
    }
}

#[async_trait::async_trait]
impl PeerSetProvider for ConfiguredPeers {
    async fn peer_tickers(&self, _ticker: &str) -> Result<Vec<String>, AnalysisError> {
        Ok(self.tickers.clone())
    }
}

async fn health() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("ok"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(analyze_routes())
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let screener = Arc::new(ScreenerClient::new());
    let orchestrator = Arc::new(AnalysisOrchestrator::new(
        screener.clone(),
        screener,
        Arc::new(ConfiguredPeers::from_env()),
    ));
    let app = build_router(AppState { orchestrator });

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
