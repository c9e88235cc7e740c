use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    ApiResponse, CreateVehicleRequest, UpdateRegistryRequest, VehicleDetailResponse,
    VehicleSummaryResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/:plate", get(get_vehicle))
        .route("/:plate", delete(delete_vehicle))
        .route("/:plate/registry", put(update_registry))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleSummaryResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(plate): Path<String>,
) -> Result<Json<VehicleDetailResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_plate(&plate).await?;
    Ok(Json(response))
}

async fn update_registry(
    State(state): State<AppState>,
    Path(plate): Path<String>,
    Json(request): Json<UpdateRegistryRequest>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update_registry(&plate, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(plate): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete(&plate).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vehículo eliminado exitosamente"
    })))
}
