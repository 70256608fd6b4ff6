//! Crew handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};

use common::AppResult;
use domain::{AddCrewMember, CreateCrew, CrewMemberResponse, CrewResponse, UpdateCrew};

use crate::http::extractors::JsonBody;
use crate::http::response::{ApiResponse, Created};
use crate::http::state::AppState;

/// Create crew routes
pub fn crew_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_crews).post(create_crew))
        .route("/:id", get(get_crew).put(update_crew).delete(delete_crew))
        .route("/:id/members", get(list_members).post(add_member))
        .route("/:id/members/:user_id", delete(remove_member))
}

#[utoipa::path(
    post,
    path = "/api/v1/crews",
    tag = "Crews",
    request_body = CreateCrew,
    responses(
        (status = 201, description = "Crew created", body = CrewResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_crew(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateCrew>,
) -> AppResult<Created<CrewResponse>> {
    let crew = state.services.crews.create_crew(payload).await?;
    Ok(Created(crew))
}

/// List crews with their members
#[utoipa::path(
    get,
    path = "/api/v1/crews",
    tag = "Crews",
    responses((status = 200, description = "All crews", body = Vec<CrewResponse>))
)]
pub async fn list_crews(State(state): State<AppState>) -> AppResult<Json<Vec<CrewResponse>>> {
    Ok(Json(state.services.crews.list_crews().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/crews/{id}",
    tag = "Crews",
    params(("id" = String, Path, description = "Crew ID")),
    responses(
        (status = 200, description = "Crew with members", body = CrewResponse),
        (status = 404, description = "Crew not found")
    )
)]
pub async fn get_crew(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<CrewResponse>> {
    let crew = state.services.crews.get_crew(&id).await?;
    Ok(ApiResponse::ok(crew))
}

#[utoipa::path(
    put,
    path = "/api/v1/crews/{id}",
    tag = "Crews",
    params(("id" = String, Path, description = "Crew ID")),
    request_body = UpdateCrew,
    responses(
        (status = 200, description = "Crew updated", body = CrewResponse),
        (status = 404, description = "Crew not found")
    )
)]
pub async fn update_crew(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateCrew>,
) -> AppResult<ApiResponse<CrewResponse>> {
    let crew = state.services.crews.update_crew(&id, payload).await?;
    Ok(ApiResponse::ok(crew))
}

#[utoipa::path(
    delete,
    path = "/api/v1/crews/{id}",
    tag = "Crews",
    params(("id" = String, Path, description = "Crew ID")),
    responses(
        (status = 204, description = "Crew deleted"),
        (status = 404, description = "Crew not found")
    )
)]
pub async fn delete_crew(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.crews.delete_crew(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/crews/{id}/members",
    tag = "Crews",
    params(("id" = String, Path, description = "Crew ID")),
    responses(
        (status = 200, description = "Crew members", body = Vec<CrewMemberResponse>),
        (status = 404, description = "Crew not found")
    )
)]
pub async fn list_members(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<CrewMemberResponse>>> {
    Ok(Json(state.services.crews.list_members(&id).await?))
}

/// Add a user to a crew
#[utoipa::path(
    post,
    path = "/api/v1/crews/{id}/members",
    tag = "Crews",
    params(("id" = String, Path, description = "Crew ID")),
    request_body = AddCrewMember,
    responses(
        (status = 201, description = "Member added", body = CrewMemberResponse),
        (status = 404, description = "Crew or user not found"),
        (status = 409, description = "User already in crew")
    )
)]
pub async fn add_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<AddCrewMember>,
) -> AppResult<Created<CrewMemberResponse>> {
    let member = state.services.crews.add_member(&id, payload).await?;
    Ok(Created(member))
}

/// Remove a user from a crew
#[utoipa::path(
    delete,
    path = "/api/v1/crews/{id}/members/{user_id}",
    tag = "Crews",
    params(
        ("id" = String, Path, description = "Crew ID"),
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 404, description = "User is not a member of the crew")
    )
)]
pub async fn remove_member(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state.services.crews.remove_member(&id, &user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
