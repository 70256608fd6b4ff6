//! Equipment handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use common::AppResult;
use domain::{CreateEquipment, EquipmentResponse, UpdateEquipment};

use crate::http::extractors::JsonBody;
use crate::http::response::{ApiResponse, Created};
use crate::http::state::AppState;

/// Create equipment routes
pub fn equipment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_equipment).post(create_equipment))
        .route(
            "/:id",
            get(get_equipment)
                .put(update_equipment)
                .delete(delete_equipment),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/equipment",
    tag = "Equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = EquipmentResponse),
        (status = 404, description = "Assigned user not found"),
        (status = 409, description = "Serial number already exists")
    )
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateEquipment>,
) -> AppResult<Created<EquipmentResponse>> {
    let equipment = state.services.equipment.create_equipment(payload).await?;
    Ok(Created(equipment))
}

#[utoipa::path(
    get,
    path = "/api/v1/equipment",
    tag = "Equipment",
    responses((status = 200, description = "All equipment", body = Vec<EquipmentResponse>))
)]
pub async fn list_equipment(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EquipmentResponse>>> {
    Ok(Json(state.services.equipment.list_equipment().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/equipment/{id}",
    tag = "Equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment", body = EquipmentResponse),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<EquipmentResponse>> {
    let equipment = state.services.equipment.get_equipment(&id).await?;
    Ok(ApiResponse::ok(equipment))
}

/// Update equipment; `null` clears the serial number or the assignee
#[utoipa::path(
    put,
    path = "/api/v1/equipment/{id}",
    tag = "Equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = EquipmentResponse),
        (status = 404, description = "Equipment or assigned user not found"),
        (status = 409, description = "Serial number already exists")
    )
)]
pub async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateEquipment>,
) -> AppResult<ApiResponse<EquipmentResponse>> {
    let equipment = state
        .services
        .equipment
        .update_equipment(&id, payload)
        .await?;
    Ok(ApiResponse::ok(equipment))
}

#[utoipa::path(
    delete,
    path = "/api/v1/equipment/{id}",
    tag = "Equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete_equipment(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
