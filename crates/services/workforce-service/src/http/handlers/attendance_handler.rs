//! Attendance handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use common::AppResult;
use domain::{AttendanceResponse, CreateAttendance, UpdateAttendance};

use crate::http::extractors::JsonBody;
use crate::http::response::{ApiResponse, Created};
use crate::http::state::AppState;

/// Create attendance routes
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attendance).post(create_attendance))
        .route(
            "/:id",
            get(get_attendance)
                .put(update_attendance)
                .delete(delete_attendance),
        )
}

/// Record attendance
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    tag = "Attendance",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = AttendanceResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_attendance(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateAttendance>,
) -> AppResult<Created<AttendanceResponse>> {
    let attendance = state.services.attendance.create_attendance(payload).await?;
    Ok(Created(attendance))
}

#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    tag = "Attendance",
    responses((status = 200, description = "All records, newest first", body = Vec<AttendanceResponse>))
)]
pub async fn list_attendance(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AttendanceResponse>>> {
    Ok(Json(state.services.attendance.list_attendance().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/attendance/{id}",
    tag = "Attendance",
    params(("id" = String, Path, description = "Attendance ID")),
    responses(
        (status = 200, description = "Attendance record", body = AttendanceResponse),
        (status = 404, description = "Attendance not found")
    )
)]
pub async fn get_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<AttendanceResponse>> {
    let attendance = state.services.attendance.get_attendance(&id).await?;
    Ok(ApiResponse::ok(attendance))
}

#[utoipa::path(
    put,
    path = "/api/v1/attendance/{id}",
    tag = "Attendance",
    params(("id" = String, Path, description = "Attendance ID")),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Attendance updated", body = AttendanceResponse),
        (status = 404, description = "Attendance not found")
    )
)]
pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateAttendance>,
) -> AppResult<ApiResponse<AttendanceResponse>> {
    let attendance = state
        .services
        .attendance
        .update_attendance(&id, payload)
        .await?;
    Ok(ApiResponse::ok(attendance))
}

#[utoipa::path(
    delete,
    path = "/api/v1/attendance/{id}",
    tag = "Attendance",
    params(("id" = String, Path, description = "Attendance ID")),
    responses(
        (status = 204, description = "Attendance deleted"),
        (status = 404, description = "Attendance not found")
    )
)]
pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.attendance.delete_attendance(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
