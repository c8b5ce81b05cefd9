use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub dump: DumpStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DumpStatus {
    pub name: String,
    pub character_encoding: Option<String>,
    pub catch_exceptions: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    info!("Health check requested");

    let interceptor = state.config.interceptor();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "traffic-dump".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        dump: DumpStatus {
            name: interceptor.name().to_string(),
            character_encoding: interceptor.character_encoding().map(str::to_string),
            catch_exceptions: interceptor.catch_exceptions(),
        },
    })
}
