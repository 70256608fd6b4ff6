//! Permission handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use common::AppResult;
use domain::{CreatePermission, PermissionResponse, UpdatePermission};

use crate::http::extractors::JsonBody;
use crate::http::response::{ApiResponse, Created};
use crate::http::state::AppState;

/// Create permission routes
pub fn permission_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_permissions).post(create_permission))
        .route(
            "/:id",
            get(get_permission)
                .put(update_permission)
                .delete(delete_permission),
        )
}

/// Grant a role permissions on a module
#[utoipa::path(
    post,
    path = "/api/v1/permissions",
    tag = "Permissions",
    request_body = CreatePermission,
    responses(
        (status = 201, description = "Permission created", body = PermissionResponse),
        (status = 404, description = "Role not found"),
        (status = 409, description = "Role already has a permission for the module")
    )
)]
pub async fn create_permission(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreatePermission>,
) -> AppResult<Created<PermissionResponse>> {
    let permission = state.services.permissions.create_permission(payload).await?;
    Ok(Created(permission))
}

#[utoipa::path(
    get,
    path = "/api/v1/permissions",
    tag = "Permissions",
    responses((status = 200, description = "All permissions", body = Vec<PermissionResponse>))
)]
pub async fn list_permissions(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PermissionResponse>>> {
    Ok(Json(state.services.permissions.list_permissions().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/permissions/{id}",
    tag = "Permissions",
    params(("id" = String, Path, description = "Permission ID")),
    responses(
        (status = 200, description = "Permission", body = PermissionResponse),
        (status = 404, description = "Permission not found")
    )
)]
pub async fn get_permission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<PermissionResponse>> {
    let permission = state.services.permissions.get_permission(&id).await?;
    Ok(ApiResponse::ok(permission))
}

#[utoipa::path(
    put,
    path = "/api/v1/permissions/{id}",
    tag = "Permissions",
    params(("id" = String, Path, description = "Permission ID")),
    request_body = UpdatePermission,
    responses(
        (status = 200, description = "Permission updated", body = PermissionResponse),
        (status = 404, description = "Permission or role not found"),
        (status = 409, description = "Role already has a permission for the module")
    )
)]
pub async fn update_permission(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdatePermission>,
) -> AppResult<ApiResponse<PermissionResponse>> {
    let permission = state
        .services
        .permissions
        .update_permission(&id, payload)
        .await?;
    Ok(ApiResponse::ok(permission))
}

#[utoipa::path(
    delete,
    path = "/api/v1/permissions/{id}",
    tag = "Permissions",
    params(("id" = String, Path, description = "Permission ID")),
    responses(
        (status = 204, description = "Permission deleted"),
        (status = 404, description = "Permission not found")
    )
)]
pub async fn delete_permission(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.permissions.delete_permission(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
