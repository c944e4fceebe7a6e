use crate::schemas::{AppState, HealthResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{debug, instrument, warn};

/// Builds the report; only an unreachable database makes the service unhealthy.
fn health_report(database_up: bool, media_available: bool) -> (StatusCode, HealthResponse) {
    let (status_code, status) = if database_up {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "unhealthy")
    };

    let report = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database_up { "connected" } else { "disconnected" }.to_string(),
        media: if media_available { "available" } else { "missing" }.to_string(),
    };

    (status_code, report)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 500, description = "Database unreachable", body = HealthResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database_up = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Database ping failed: {}", e);
            false
        }
    };

    let media_available = matches!(
        tokio::fs::metadata(state.media.root()).await,
        Ok(meta) if meta.is_dir()
    );

    let (status_code, report) = health_report(database_up, media_available);
    debug!(status = %report.status, database = %report.database, media = %report.media, "Health check");

    (status_code, Json(report))
}
