/// Health check endpoint
///
/// `GET /api/health` reports the data and auth collaborators.
///
/// ```json
/// {
///   "status": "healthy",
///   "timestamp": "2024-01-01T00:00:00Z",
///   "version": "0.1.0",
///   "services": { "database": "connected", "auth": "configured" },
///   "uptime": 42
/// }
/// ```
///
/// Without auth the service is `unhealthy` (503). An unreachable database
/// only degrades it.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use staffing_shared::db::pool::health_check;

use crate::app::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    pub services: Services,
    /// Seconds since startup
    pub uptime: u64,
}

#[derive(Debug, Serialize)]
pub struct Services {
    pub database: &'static str,
    pub auth: &'static str,
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.source.pool() {
        Some(pool) => match health_check(pool).await {
            Ok(()) => "connected",
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                "disconnected"
            }
        },
        None => "not_configured",
    };
    let auth_configured = state.config.auth.is_configured();

    let (status, code) = if !auth_configured {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    } else if database == "disconnected" {
        ("degraded", StatusCode::OK)
    } else {
        ("healthy", StatusCode::OK)
    };

    let body = HealthResponse {
        status,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        services: Services {
            database,
            auth: if auth_configured { "configured" } else { "not_configured" },
        },
        uptime: state.started_at.elapsed().as_secs(),
    };

    (code, Json(body))
}
