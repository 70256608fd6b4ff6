//! Role handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use common::AppResult;
use domain::{CreateRole, PermissionResponse, RoleResponse, UpdateRole, UserResponse};

use crate::http::extractors::JsonBody;
use crate::http::response::{ApiResponse, Created};
use crate::http::state::AppState;

/// Result of revoking a role's permissions
#[derive(Debug, Serialize, ToSchema)]
pub struct RevokedPermissions {
    pub revoked: u64,
}

/// Create role routes
pub fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_roles).post(create_role))
        .route("/:id", get(get_role).put(update_role).delete(delete_role))
        .route(
            "/:id/permissions",
            get(list_role_permissions).delete(revoke_role_permissions),
        )
        .route("/:id/users", get(list_role_users))
}

/// Create a role
#[utoipa::path(
    post,
    path = "/api/v1/roles",
    tag = "Roles",
    request_body = CreateRole,
    responses(
        (status = 201, description = "Role created", body = RoleResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Role name already exists")
    )
)]
pub async fn create_role(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateRole>,
) -> AppResult<Created<RoleResponse>> {
    let role = state.services.roles.create_role(payload).await?;
    Ok(Created(role))
}

/// List all roles
#[utoipa::path(
    get,
    path = "/api/v1/roles",
    tag = "Roles",
    responses((status = 200, description = "All roles", body = Vec<RoleResponse>))
)]
pub async fn list_roles(State(state): State<AppState>) -> AppResult<Json<Vec<RoleResponse>>> {
    Ok(Json(state.services.roles.list_roles().await?))
}

/// Get role by ID
#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}",
    tag = "Roles",
    params(("id" = String, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role", body = RoleResponse),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Role not found")
    )
)]
pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<RoleResponse>> {
    let role = state.services.roles.get_role(&id).await?;
    Ok(ApiResponse::ok(role))
}

/// Update role
#[utoipa::path(
    put,
    path = "/api/v1/roles/{id}",
    tag = "Roles",
    params(("id" = String, Path, description = "Role ID")),
    request_body = UpdateRole,
    responses(
        (status = 200, description = "Role updated", body = RoleResponse),
        (status = 404, description = "Role not found"),
        (status = 409, description = "Role name already exists")
    )
)]
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateRole>,
) -> AppResult<ApiResponse<RoleResponse>> {
    let role = state.services.roles.update_role(&id, payload).await?;
    Ok(ApiResponse::ok(role))
}

/// Delete role
#[utoipa::path(
    delete,
    path = "/api/v1/roles/{id}",
    tag = "Roles",
    params(("id" = String, Path, description = "Role ID")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 404, description = "Role not found")
    )
)]
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.roles.delete_role(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Permissions granted to a role
#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}/permissions",
    tag = "Roles",
    params(("id" = String, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role permissions", body = Vec<PermissionResponse>),
        (status = 404, description = "Role not found")
    )
)]
pub async fn list_role_permissions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<PermissionResponse>>> {
    Ok(Json(state.services.permissions.list_for_role(&id).await?))
}

/// Revoke every permission of a role
#[utoipa::path(
    delete,
    path = "/api/v1/roles/{id}/permissions",
    tag = "Roles",
    params(("id" = String, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Number of permissions revoked", body = RevokedPermissions),
        (status = 404, description = "Role not found")
    )
)]
pub async fn revoke_role_permissions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<RevokedPermissions>> {
    let revoked = state.services.permissions.revoke_for_role(&id).await?;
    Ok(ApiResponse::ok(RevokedPermissions { revoked })
        .with_message(format!("{} permission(s) revoked", revoked)))
}

/// Users holding a role
#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}/users",
    tag = "Roles",
    params(("id" = String, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Users with the role", body = Vec<UserResponse>),
        (status = 404, description = "Role not found")
    )
)]
pub async fn list_role_users(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<UserResponse>>> {
    Ok(Json(state.services.users.list_by_role(&id).await?))
}
