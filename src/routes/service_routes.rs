use axum::{
    extract::{Path, State},
    routing::{delete, post, put},
    Json, Router,
};

use crate::controllers::service_entry_controller::ServiceEntryController;
use crate::dto::service_dto::{CreateServiceEntryRequest, UpdateServiceEntryRequest};
use crate::dto::vehicle_dto::{ApiResponse, VehicleDetailResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

// Router anidado bajo /api/vehicle/:plate/services
pub fn create_service_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_service_entry))
        .route("/:id", put(update_service_entry))
        .route("/:id", delete(delete_service_entry))
}

async fn create_service_entry(
    State(state): State<AppState>,
    Path(plate): Path<String>,
    Json(request): Json<CreateServiceEntryRequest>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = ServiceEntryController::new(state.pool.clone());
    let response = controller.create(&plate, request).await?;
    Ok(Json(response))
}

async fn update_service_entry(
    State(state): State<AppState>,
    Path((plate, id)): Path<(String, String)>,
    Json(request): Json<UpdateServiceEntryRequest>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = ServiceEntryController::new(state.pool.clone());
    let response = controller.update(&plate, &id, request).await?;
    Ok(Json(response))
}

async fn delete_service_entry(
    State(state): State<AppState>,
    Path((plate, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = ServiceEntryController::new(state.pool.clone());
    let response = controller.delete(&plate, &id).await?;
    Ok(Json(response))
}
