use sqlx::PgPool;
use validator::Validate;

use crate::controllers::vehicle_controller::build_detail_response;
use crate::dto::inspection_dto::{CreateInspectionRequest, UpdateInspectionRequest};
use crate::dto::vehicle_dto::{ApiResponse, VehicleDetailResponse};
use crate::models::generate_entry_id;
use crate::models::inspection::Inspection;
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::{VehicleCollection, VehicleRepository};
use crate::utils::errors::{field_error, AppError};
use crate::utils::sanitize;
use crate::utils::validation::validate_positive;

pub struct InspectionController {
    repository: VehicleRepository,
}

impl InspectionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        plate: &str,
        request: CreateInspectionRequest,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        request.validate()?;
        validate_positive(request.mileage).map_err(|e| field_error("mileage", e))?;

        let vehicle = self.find_vehicle(plate).await?;

        let inspection = Inspection {
            id: generate_entry_id(),
            date: request.date,
            mileage: request.mileage,
            outcome: request.outcome,
            notes: request.notes.map(|n| n.trim().to_uppercase()).filter(|n| !n.is_empty()),
        };

        let mut inspections = vehicle.inspections.0;
        inspections.push(inspection);

        self.patch_and_reload(plate, &inspections, "Revisión registrada exitosamente".to_string())
            .await
    }

    pub async fn update(
        &self,
        plate: &str,
        inspection_id: &str,
        request: UpdateInspectionRequest,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        request.validate()?;
        validate_positive(request.mileage).map_err(|e| field_error("mileage", e))?;

        let vehicle = self.find_vehicle(plate).await?;
        let mut inspections = vehicle.inspections.0;

        let entry = inspections
            .iter_mut()
            .find(|inspection| inspection.id == inspection_id)
            .ok_or_else(|| AppError::NotFound("Revisión no encontrada".to_string()))?;

        entry.date = request.date;
        entry.mileage = request.mileage;
        entry.outcome = request.outcome;
        entry.notes = request.notes.map(|n| n.trim().to_uppercase()).filter(|n| !n.is_empty());

        self.patch_and_reload(plate, &inspections, "Revisión actualizada exitosamente".to_string())
            .await
    }

    pub async fn delete(
        &self,
        plate: &str,
        inspection_id: &str,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        let vehicle = self.find_vehicle(plate).await?;
        let mut inspections = vehicle.inspections.0;

        let before = inspections.len();
        inspections.retain(|inspection| inspection.id != inspection_id);
        if inspections.len() == before {
            return Err(AppError::NotFound("Revisión no encontrada".to_string()));
        }

        self.patch_and_reload(plate, &inspections, "Revisión eliminada exitosamente".to_string())
            .await
    }

    async fn find_vehicle(&self, plate: &str) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_plate(plate)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))
    }

    async fn patch_and_reload(
        &self,
        plate: &str,
        inspections: &[Inspection],
        message: String,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        let document = sanitize::to_store_value(&inspections)?;
        self.repository
            .patch_collection(plate, VehicleCollection::Inspections, document)
            .await?;

        let refreshed = self.find_vehicle(plate).await?;
        Ok(ApiResponse::success_with_message(
            build_detail_response(refreshed),
            message,
        ))
    }
}
