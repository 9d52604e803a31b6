use axum::extract::State;
use axum::http::Uri;
use serde::{Deserialize, Serialize};

use crate::api::extract::Json;
use crate::error::{ApiError, ApiResult, AppError};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
}

/// `GET {base}/health`. Pings the database.
///
/// A failed ping is an unclassified failure and answers 500.
pub async fn health_handler(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    state.database.ping().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        environment: state.config.app_env.clone(),
    }))
}

/// Fallback for routes that do not exist.
pub async fn not_found_handler(uri: Uri) -> ApiError {
    AppError::not_found(format!("Route not found: {}", uri.path())).into()
}
