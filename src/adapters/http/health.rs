//! Readiness probe.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::domain::foundation::{DomainError, ErrorCode};

use super::envelope::{ApiEnvelope, ApiError};
use super::AppState;

/// GET /health - Readiness probe.
///
/// Reports 503 while the database pool cannot serve queries; the
/// process stays up and keeps answering so orchestrators can watch it
/// come back.
pub async fn health_check(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    if let Some(pool) = &state.pool {
        sqlx::query("SELECT 1").execute(pool).await.map_err(|e| {
            tracing::warn!("Health check failed: {}", e);
            DomainError::new(
                ErrorCode::DependencyUnavailable,
                "Database unavailable",
            )
        })?;
    }

    Ok(Json(ApiEnvelope::ok(
        "Service healthy",
        serde_json::json!({ "status": "ok" }),
    )))
}
