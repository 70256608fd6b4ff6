//! Time-off handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use common::AppResult;
use domain::{CreateTimeOff, TimeOffResponse, UpdateTimeOff};

use super::paired_range;
use crate::http::extractors::{JsonBody, QueryParams};
use crate::http::response::{ApiResponse, Created};
use crate::http::state::AppState;

/// Optional window; requests covering any day in it are returned
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OverlapQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Create time-off routes
pub fn time_off_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_time_off).post(create_time_off))
        .route(
            "/:id",
            get(get_time_off)
                .put(update_time_off)
                .delete(delete_time_off),
        )
        .route("/status/:status", get(list_by_status))
}

/// File a time-off request
#[utoipa::path(
    post,
    path = "/api/v1/time-off",
    tag = "Time Off",
    request_body = CreateTimeOff,
    responses(
        (status = 201, description = "Request filed as Pending", body = TimeOffResponse),
        (status = 400, description = "start_date after end_date"),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_time_off(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateTimeOff>,
) -> AppResult<Created<TimeOffResponse>> {
    let time_off = state.services.time_off.create_time_off(payload).await?;
    Ok(Created(time_off))
}

/// List requests, optionally those overlapping a window
#[utoipa::path(
    get,
    path = "/api/v1/time-off",
    tag = "Time Off",
    params(OverlapQuery),
    responses(
        (status = 200, description = "Requests, latest start first", body = Vec<TimeOffResponse>),
        (status = 400, description = "Malformed window")
    )
)]
pub async fn list_time_off(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<OverlapQuery>,
) -> AppResult<Json<Vec<TimeOffResponse>>> {
    let service = &state.services.time_off;

    let requests = match paired_range(query.from, query.to)? {
        Some((from, to)) => service.list_overlapping(from, to).await?,
        None => service.list_time_off().await?,
    };
    Ok(Json(requests))
}

#[utoipa::path(
    get,
    path = "/api/v1/time-off/{id}",
    tag = "Time Off",
    params(("id" = String, Path, description = "Time-off ID")),
    responses(
        (status = 200, description = "Time-off request", body = TimeOffResponse),
        (status = 404, description = "Time off not found")
    )
)]
pub async fn get_time_off(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<TimeOffResponse>> {
    let time_off = state.services.time_off.get_time_off(&id).await?;
    Ok(ApiResponse::ok(time_off))
}

/// Update a request, including its status
#[utoipa::path(
    put,
    path = "/api/v1/time-off/{id}",
    tag = "Time Off",
    params(("id" = String, Path, description = "Time-off ID")),
    request_body = UpdateTimeOff,
    responses(
        (status = 200, description = "Request updated", body = TimeOffResponse),
        (status = 400, description = "start_date after end_date"),
        (status = 404, description = "Time off not found")
    )
)]
pub async fn update_time_off(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateTimeOff>,
) -> AppResult<ApiResponse<TimeOffResponse>> {
    let time_off = state
        .services
        .time_off
        .update_time_off(&id, payload)
        .await?;
    Ok(ApiResponse::ok(time_off))
}

#[utoipa::path(
    delete,
    path = "/api/v1/time-off/{id}",
    tag = "Time Off",
    params(("id" = String, Path, description = "Time-off ID")),
    responses(
        (status = 204, description = "Request deleted"),
        (status = 404, description = "Time off not found")
    )
)]
pub async fn delete_time_off(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.time_off.delete_time_off(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Requests in one status
#[utoipa::path(
    get,
    path = "/api/v1/time-off/status/{status}",
    tag = "Time Off",
    params(("status" = String, Path, description = "Pending, Approved or Rejected")),
    responses(
        (status = 200, description = "Requests in the status", body = Vec<TimeOffResponse>),
        (status = 400, description = "Unknown status")
    )
)]
pub async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<TimeOffResponse>>> {
    Ok(Json(state.services.time_off.list_by_status(&status).await?))
}
