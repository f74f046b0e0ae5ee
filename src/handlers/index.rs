use axum::{Json, response::IntoResponse};
use serde_json::json;

use crate::error::AppError;

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to the photogram API" }))
}

/// Catch-all for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("404 Page Not Found".to_string())
}
