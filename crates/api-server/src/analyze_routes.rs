//! Analyze API route: the single request/response entry point.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use analysis_core::FullAnalysis;

use crate::{ApiResponse, AppState};

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub ticker: String,
    /// Optional explicit peer set; overrides the configured one.
    #[serde(default)]
    pub peers: Option<Vec<String>>,
}

pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/api/analyze", post(analyze))
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<ApiResponse<FullAnalysis>> {
    let ticker = request.ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Json(ApiResponse::error("ticker must not be empty"));
    }

    match state.orchestrator.analyze(&ticker, request.peers).await {
        Ok(analysis) => Json(ApiResponse::success(analysis)),
        Err(e) => {
            tracing::warn!("Analysis failed for {}: {}", ticker, e);
            Json(ApiResponse::error(e.to_string()))
        }
    }
}
