use axum::extract::State;
use axum::Json;

use super::AppState;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once the registry is loaded; reports how much of it is tracked.
pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    let registry = state.controller.registry();
    Json(serde_json::json!({
        "status": "ready",
        "projects": registry.projects.len(),
        "bridges": registry.bridge_count(),
        "tokens": registry.tokens.len(),
    }))
}
