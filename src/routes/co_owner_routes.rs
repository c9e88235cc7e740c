use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Json, Router,
};

use crate::controllers::co_owner_controller::CoOwnerController;
use crate::dto::co_owner_dto::AddCoOwnerRequest;
use crate::dto::vehicle_dto::{ApiResponse, VehicleDetailResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

// Router anidado bajo /api/vehicle/:plate/co-owners
pub fn create_co_owner_router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_co_owner))
        .route("/:tax_code", delete(remove_co_owner))
}

async fn add_co_owner(
    State(state): State<AppState>,
    Path(plate): Path<String>,
    Json(request): Json<AddCoOwnerRequest>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = CoOwnerController::new(state.pool.clone());
    let response = controller.add(&plate, request).await?;
    Ok(Json(response))
}

async fn remove_co_owner(
    State(state): State<AppState>,
    Path((plate, tax_code)): Path<(String, String)>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = CoOwnerController::new(state.pool.clone());
    let response = controller.remove(&plate, &tax_code).await?;
    Ok(Json(response))
}
