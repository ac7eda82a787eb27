//! Health check handler.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Model name, or null when no API key is configured.
    pub generator: Option<String>,
    /// Whether summaries can be persisted.
    pub store: bool,
}

#[utoipa::path(get, path = "/health", tag = "System",
    responses((status = 200, description = "Service is up", body = HealthResponse)))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        generator: state.generator.as_ref().map(|g| g.model_name().to_string()),
        store: state.notes.is_some(),
    })
}
