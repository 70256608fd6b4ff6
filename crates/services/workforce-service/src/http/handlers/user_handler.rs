//! User handlers, including the per-user views of other entity families.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use common::{AppError, AppResult};
use domain::{
    AttendanceResponse, CreateUser, CrewResponse, EquipmentResponse, TimeOffResponse,
    TripResponse, UpdateUser, UserResponse,
};

use super::paired_range;
use crate::http::extractors::{JsonBody, QueryParams};
use crate::http::response::{ApiResponse, Created};
use crate::http::state::AppState;

/// Attendance filter: a single day, or a `[from, to]` window
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Day the record was created (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Optional `[from, to]` window on trip start time
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TripQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/crews", get(list_user_crews))
        .route("/:id/equipment", get(list_user_equipment))
        .route("/:id/attendance", get(list_user_attendance))
        .route("/:id/time-off", get(list_user_time_off))
        .route("/:id/trips", get(list_user_trips))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Role not found"),
        (status = 409, description = "Employee ID or email already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUser>,
) -> AppResult<Created<UserResponse>> {
    let user = state.services.users.create_user(payload).await?;
    Ok(Created(user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses((status = 200, description = "All users", body = Vec<UserResponse>))
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    Ok(Json(state.services.users.list_users().await?))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.services.users.get_user(&id).await?;
    Ok(ApiResponse::ok(user))
}

/// Update user
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User or role not found"),
        (status = 409, description = "Employee ID or email already exists")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateUser>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.services.users.update_user(&id, payload).await?;
    Ok(ApiResponse::ok(user))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.users.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Crews the user belongs to
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/crews",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User crews", body = Vec<CrewResponse>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_user_crews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<CrewResponse>>> {
    Ok(Json(state.services.crews.list_for_user(&id).await?))
}

/// Equipment assigned to the user
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/equipment",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Assigned equipment", body = Vec<EquipmentResponse>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_user_equipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<EquipmentResponse>>> {
    Ok(Json(state.services.equipment.list_for_user(&id).await?))
}

/// Attendance of the user, optionally for one day or a window
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/attendance",
    tag = "Users",
    params(("id" = String, Path, description = "User ID"), AttendanceQuery),
    responses(
        (status = 200, description = "Attendance records, newest first", body = Vec<AttendanceResponse>),
        (status = 400, description = "Malformed ID or filter"),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_user_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<AttendanceQuery>,
) -> AppResult<Json<Vec<AttendanceResponse>>> {
    let attendance = &state.services.attendance;

    if let Some(date) = query.date {
        if query.from.is_some() || query.to.is_some() {
            return Err(AppError::invalid_argument(
                "date cannot be combined with from and to",
            ));
        }
        let record = attendance.find_for_day(&id, date).await?;
        return Ok(Json(record.into_iter().collect()));
    }

    let records = match paired_range(query.from, query.to)? {
        Some((from, to)) => attendance.list_for_user_between(&id, from, to).await?,
        None => attendance.list_for_user(&id).await?,
    };
    Ok(Json(records))
}

/// Time-off requests of the user
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/time-off",
    tag = "Users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Time-off requests", body = Vec<TimeOffResponse>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_user_time_off(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<TimeOffResponse>>> {
    Ok(Json(state.services.time_off.list_for_user(&id).await?))
}

/// Trips of the user, optionally within a window
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/trips",
    tag = "Users",
    params(("id" = String, Path, description = "User ID"), TripQuery),
    responses(
        (status = 200, description = "Trips, latest first", body = Vec<TripResponse>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_user_trips(
    State(state): State<AppState>,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<TripQuery>,
) -> AppResult<Json<Vec<TripResponse>>> {
    let trips = &state.services.trips;

    let records = match paired_range(query.from, query.to)? {
        Some((from, to)) => trips.list_for_user_between(&id, from, to).await?,
        None => trips.list_for_user(&id).await?,
    };
    Ok(Json(records))
}
