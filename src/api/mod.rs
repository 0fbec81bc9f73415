pub mod health;
pub mod report;

use crate::orchestration::ReportController;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ReportController>,
}

impl AppState {
    pub fn new(controller: Arc<ReportController>) -> Self {
        Self { controller }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/api/data", get(report::get_data))
        .layer(cors)
        .with_state(state)
}
