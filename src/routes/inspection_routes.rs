use axum::{
    extract::{Path, State},
    routing::{delete, post, put},
    Json, Router,
};

use crate::controllers::inspection_controller::InspectionController;
use crate::dto::inspection_dto::{CreateInspectionRequest, UpdateInspectionRequest};
use crate::dto::vehicle_dto::{ApiResponse, VehicleDetailResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

// Router anidado bajo /api/vehicle/:plate/inspections
pub fn create_inspection_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_inspection))
        .route("/:id", put(update_inspection))
        .route("/:id", delete(delete_inspection))
}

async fn create_inspection(
    State(state): State<AppState>,
    Path(plate): Path<String>,
    Json(request): Json<CreateInspectionRequest>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = InspectionController::new(state.pool.clone());
    let response = controller.create(&plate, request).await?;
    Ok(Json(response))
}

async fn update_inspection(
    State(state): State<AppState>,
    Path((plate, id)): Path<(String, String)>,
    Json(request): Json<UpdateInspectionRequest>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = InspectionController::new(state.pool.clone());
    let response = controller.update(&plate, &id, request).await?;
    Ok(Json(response))
}

async fn delete_inspection(
    State(state): State<AppState>,
    Path((plate, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = InspectionController::new(state.pool.clone());
    let response = controller.delete(&plate, &id).await?;
    Ok(Json(response))
}
