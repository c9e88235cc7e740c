use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::person_controller::PersonController;
use crate::dto::person_dto::{PersonResponse, RegisterPersonRequest, UpdatePersonRequest};
use crate::dto::vehicle_dto::{ApiResponse, VehicleSummaryResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_person_router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_person))
        .route("/:id", get(get_person))
        .route("/:id", put(update_person))
        .route("/:id/vehicles", get(person_vehicles))
        .route("/by-tax-code/:tax_code", get(get_person_by_tax_code))
}

async fn register_person(
    State(state): State<AppState>,
    Json(request): Json<RegisterPersonRequest>,
) -> Result<Json<ApiResponse<PersonResponse>>, AppError> {
    let controller = PersonController::new(state.pool.clone());
    let response = controller.register(request).await?;
    Ok(Json(response))
}

async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PersonResponse>, AppError> {
    let controller = PersonController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn get_person_by_tax_code(
    State(state): State<AppState>,
    Path(tax_code): Path<String>,
) -> Result<Json<PersonResponse>, AppError> {
    let controller = PersonController::new(state.pool.clone());
    let response = controller.get_by_tax_code(&tax_code).await?;
    Ok(Json(response))
}

async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePersonRequest>,
) -> Result<Json<ApiResponse<PersonResponse>>, AppError> {
    let controller = PersonController::new(state.pool.clone());
    let response = controller.update_profile(id, request).await?;
    Ok(Json(response))
}

async fn person_vehicles(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<VehicleSummaryResponse>>, AppError> {
    let controller = PersonController::new(state.pool.clone());
    let response = controller.vehicles(id).await?;
    Ok(Json(response))
}
