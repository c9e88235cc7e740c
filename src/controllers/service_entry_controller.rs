use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::controllers::vehicle_controller::build_detail_response;
use crate::dto::service_dto::{CreateServiceEntryRequest, UpdateServiceEntryRequest};
use crate::dto::vehicle_dto::{ApiResponse, VehicleDetailResponse};
use crate::models::generate_entry_id;
use crate::models::service_entry::ServiceEntry;
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::{VehicleCollection, VehicleRepository};
use crate::utils::errors::{field_error, AppError};
use crate::utils::sanitize;
use crate::utils::validation::{validate_non_negative, validate_positive};

pub struct ServiceEntryController {
    repository: VehicleRepository,
}

impl ServiceEntryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        plate: &str,
        request: CreateServiceEntryRequest,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        request.validate()?;
        validate_positive(request.mileage).map_err(|e| field_error("mileage", e))?;
        let cost = request.cost.unwrap_or(Decimal::ZERO);
        validate_non_negative(cost).map_err(|e| field_error("cost", e))?;

        let vehicle = self.find_vehicle(plate).await?;

        let entry = ServiceEntry {
            id: generate_entry_id(),
            date: request.date,
            mileage: request.mileage,
            description: request
                .description
                .map(|d| d.trim().to_uppercase())
                .unwrap_or_default(),
            cost,
            kind: request.kind,
        };

        let mut entries = vehicle.service_entries.0;
        entries.push(entry);

        self.patch_and_reload(plate, &entries, "Intervención registrada exitosamente".to_string())
            .await
    }

    pub async fn update(
        &self,
        plate: &str,
        entry_id: &str,
        request: UpdateServiceEntryRequest,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        request.validate()?;
        validate_positive(request.mileage).map_err(|e| field_error("mileage", e))?;
        let cost = request.cost.unwrap_or(Decimal::ZERO);
        validate_non_negative(cost).map_err(|e| field_error("cost", e))?;

        let vehicle = self.find_vehicle(plate).await?;
        let mut entries = vehicle.service_entries.0;

        let entry = entries
            .iter_mut()
            .find(|entry| entry.id == entry_id)
            .ok_or_else(|| AppError::NotFound("Intervención no encontrada".to_string()))?;

        entry.date = request.date;
        entry.mileage = request.mileage;
        entry.description = request
            .description
            .map(|d| d.trim().to_uppercase())
            .unwrap_or_default();
        entry.cost = cost;
        entry.kind = request.kind;

        self.patch_and_reload(plate, &entries, "Intervención actualizada exitosamente".to_string())
            .await
    }

    pub async fn delete(
        &self,
        plate: &str,
        entry_id: &str,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        let vehicle = self.find_vehicle(plate).await?;
        let mut entries = vehicle.service_entries.0;

        let before = entries.len();
        entries.retain(|entry| entry.id != entry_id);
        if entries.len() == before {
            return Err(AppError::NotFound("Intervención no encontrada".to_string()));
        }

        self.patch_and_reload(plate, &entries, "Intervención eliminada exitosamente".to_string())
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
        entries: &[ServiceEntry],
        message: String,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        let document = sanitize::to_store_value(&entries)?;
        self.repository
            .patch_collection(plate, VehicleCollection::ServiceEntries, document)
            .await?;

        let refreshed = self.find_vehicle(plate).await?;
        Ok(ApiResponse::success_with_message(
            build_detail_response(refreshed),
            message,
        ))
    }
}
