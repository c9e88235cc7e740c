use axum::{
    extract::{Path, State},
    routing::{delete, post, put},
    Json, Router,
};

use crate::controllers::insurance_controller::InsuranceController;
use crate::dto::insurance_dto::{CreateInsuranceRequest, DocumentUpload, UpdateInsuranceRequest};
use crate::dto::vehicle_dto::{ApiResponse, VehicleDetailResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

// Router anidado bajo /api/vehicle/:plate/insurances
pub fn create_insurance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_insurance))
        .route("/:id", put(update_insurance))
        .route("/:id", delete(delete_insurance))
        .route("/:id/document", post(upload_document))
        .route("/:id/document", delete(delete_document))
}

async fn create_insurance(
    State(state): State<AppState>,
    Path(plate): Path<String>,
    Json(request): Json<CreateInsuranceRequest>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = InsuranceController::new(state.pool.clone(), state.storage.clone());
    let response = controller.create(&plate, request).await?;
    Ok(Json(response))
}

async fn update_insurance(
    State(state): State<AppState>,
    Path((plate, id)): Path<(String, String)>,
    Json(request): Json<UpdateInsuranceRequest>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = InsuranceController::new(state.pool.clone(), state.storage.clone());
    let response = controller.update(&plate, &id, request).await?;
    Ok(Json(response))
}

async fn delete_insurance(
    State(state): State<AppState>,
    Path((plate, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = InsuranceController::new(state.pool.clone(), state.storage.clone());
    let response = controller.delete(&plate, &id).await?;
    Ok(Json(response))
}

async fn upload_document(
    State(state): State<AppState>,
    Path((plate, id)): Path<(String, String)>,
    Json(request): Json<DocumentUpload>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = InsuranceController::new(state.pool.clone(), state.storage.clone());
    let response = controller.upload_policy_document(&plate, &id, request).await?;
    Ok(Json(response))
}

async fn delete_document(
    State(state): State<AppState>,
    Path((plate, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = InsuranceController::new(state.pool.clone(), state.storage.clone());
    let response = controller.delete_policy_document(&plate, &id).await?;
    Ok(Json(response))
}
