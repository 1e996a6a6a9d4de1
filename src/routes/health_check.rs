use crate::routes::constants::HEALTH_STATUS_OK;
use crate::startup::AppState;
use axum::Json;
use axum::extract::State;
use chrono::{SecondsFormat, Utc};

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// Always `OK` while the process is serving requests
    pub status: &'static str,
    /// RFC 3339 timestamp of the check
    pub timestamp: String,
    /// Runtime environment name
    pub environment: &'static str,
    /// Application version
    pub version: &'static str,
}

/// Health check endpoint
///
/// Returns 200 OK if the service is running
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS_OK,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        environment: state.environment.as_str(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
