//! Trip handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use common::AppResult;
use domain::{CreateTrip, TripResponse, UpdateTrip};

use crate::http::extractors::JsonBody;
use crate::http::response::{ApiResponse, Created};
use crate::http::state::AppState;

/// Create trip routes
pub fn trip_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route("/:id", get(get_trip).put(update_trip).delete(delete_trip))
}

/// Log a trip
#[utoipa::path(
    post,
    path = "/api/v1/trips",
    tag = "Trips",
    request_body = CreateTrip,
    responses(
        (status = 201, description = "Trip logged", body = TripResponse),
        (status = 400, description = "Negative distance or end before start"),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_trip(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateTrip>,
) -> AppResult<Created<TripResponse>> {
    let trip = state.services.trips.create_trip(payload).await?;
    Ok(Created(trip))
}

#[utoipa::path(
    get,
    path = "/api/v1/trips",
    tag = "Trips",
    responses((status = 200, description = "All trips, latest first", body = Vec<TripResponse>))
)]
pub async fn list_trips(State(state): State<AppState>) -> AppResult<Json<Vec<TripResponse>>> {
    Ok(Json(state.services.trips.list_trips().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/trips/{id}",
    tag = "Trips",
    params(("id" = String, Path, description = "Trip ID")),
    responses(
        (status = 200, description = "Trip", body = TripResponse),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<TripResponse>> {
    let trip = state.services.trips.get_trip(&id).await?;
    Ok(ApiResponse::ok(trip))
}

#[utoipa::path(
    put,
    path = "/api/v1/trips/{id}",
    tag = "Trips",
    params(("id" = String, Path, description = "Trip ID")),
    request_body = UpdateTrip,
    responses(
        (status = 200, description = "Trip updated", body = TripResponse),
        (status = 400, description = "Negative distance or end before start"),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateTrip>,
) -> AppResult<ApiResponse<TripResponse>> {
    let trip = state.services.trips.update_trip(&id, payload).await?;
    Ok(ApiResponse::ok(trip))
}

#[utoipa::path(
    delete,
    path = "/api/v1/trips/{id}",
    tag = "Trips",
    params(("id" = String, Path, description = "Trip ID")),
    responses(
        (status = 204, description = "Trip deleted"),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.trips.delete_trip(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
