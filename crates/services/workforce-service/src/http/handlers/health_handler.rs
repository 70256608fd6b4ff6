//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::http::state::AppState;

const HEALTHY: &str = "healthy";
const UNHEALTHY: &str = "unhealthy";
const DISABLED: &str = "disabled";

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub dependencies: DependencyStatus,
}

/// Status of each backing dependency.
#[derive(Debug, Serialize, ToSchema)]
pub struct DependencyStatus {
    pub database: DependencyHealth,
    pub event_bus: DependencyHealth,
}

/// Dependency health with optional error message.
#[derive(Debug, Serialize, ToSchema)]
pub struct DependencyHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DependencyHealth {
    fn from_result<E: std::fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self {
                status: HEALTHY.to_string(),
                error: None,
            },
            Err(e) => Self {
                status: UNHEALTHY.to_string(),
                error: Some(e.to_string()),
            },
        }
    }

    fn is_unhealthy(&self) -> bool {
        self.status == UNHEALTHY
    }
}

/// Create health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - verifies database and event bus connectivity.
///
/// A disabled event bus does not degrade the service; events are optional.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "Health",
    responses(
        (status = 200, description = "All dependencies reachable", body = HealthResponse),
        (status = 503, description = "A dependency is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let database = DependencyHealth::from_result(state.db.ping().await);

    let event_bus = match state.events.ping().await {
        Some(result) => DependencyHealth::from_result(result),
        None => DependencyHealth {
            status: DISABLED.to_string(),
            error: None,
        },
    };

    let degraded = database.is_unhealthy() || event_bus.is_unhealthy();

    let response = HealthResponse {
        status: if degraded { "degraded" } else { HEALTHY }.to_string(),
        dependencies: DependencyStatus {
            database,
            event_bus,
        },
    };

    if degraded {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    } else {
        (StatusCode::OK, Json(response)).into_response()
    }
}
