use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use serde::Serialize;
use utils::response::ApiResponse;

use crate::DeploymentImpl;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub claude_configured: bool,
    pub store_configured: bool,
}

/// GET /api/health
pub async fn health(State(deployment): State<DeploymentImpl>) -> ResponseJson<ApiResponse<HealthStatus>> {
    ResponseJson(ApiResponse::success(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        claude_configured: deployment.generator().is_some(),
        store_configured: deployment.projects().is_some(),
    }))
}

pub fn router(_deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    Router::new().route("/health", get(health))
}
