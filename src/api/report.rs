use axum::extract::State;
use axum::Json;

use super::AppState;
use crate::engine::ReportOutput;
use crate::error::AppError;

pub async fn get_data(State(state): State<AppState>) -> Result<Json<ReportOutput>, AppError> {
    let output = state.controller.get_daily().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to build report");
        AppError::from(e)
    })?;
    Ok(Json(output))
}
