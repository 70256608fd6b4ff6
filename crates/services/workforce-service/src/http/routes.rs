//! Route configuration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::http::handlers::{
    attendance_routes, crew_routes, equipment_routes, health_routes, permission_routes,
    role_routes, time_off_routes, trip_routes, user_routes,
};
use crate::http::openapi::ApiDoc;
use crate::http::state::AppState;

/// Prefix of every entity route
pub const API_PREFIX: &str = "/api/v1";

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/roles", role_routes())
        .nest("/permissions", permission_routes())
        .nest("/users", user_routes())
        .nest("/crews", crew_routes())
        .nest("/equipment", equipment_routes())
        .nest("/attendance", attendance_routes())
        .nest("/time-off", time_off_routes())
        .nest("/trips", trip_routes());

    Router::new()
        .nest("/healthz", health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(API_PREFIX, api)
        .with_state(state)
}
