use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::vehicle_dto::{
    ApiResponse, CreateVehicleRequest, InspectionSection, InsuranceSection, PolicyView,
    UpdateRegistryRequest, VehicleDetailResponse, VehicleSummaryResponse,
};
use crate::models::person::PersonRef;
use crate::models::vehicle::Vehicle;
use crate::repositories::person_repository::PersonRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::{inspection_service, insurance_service};
use crate::utils::dates::start_of_day;
use crate::utils::errors::{field_error, AppError};
use crate::utils::validation::validate_license_plate;

/// Construir la respuesta de detalle con los estados derivados (póliza
/// activa, histórico, próxima revisión) calculados sobre el día de hoy
pub fn build_detail_response(vehicle: Vehicle) -> VehicleDetailResponse {
    let today = start_of_day(Utc::now());

    let insurances = vehicle.insurances.0;
    let active = insurance_service::active_policy(&insurances, today).map(|policy| PolicyView {
        policy: policy.clone(),
        due_soon: insurance_service::is_due_soon(policy.end_date, today),
        expired: false,
    });
    let history = insurance_service::policy_history(&insurances, today)
        .into_iter()
        .map(|policy| PolicyView {
            policy: policy.clone(),
            due_soon: insurance_service::is_due_soon(policy.end_date, today),
            expired: insurance_service::is_expired(policy.end_date, today),
        })
        .collect();

    let inspections = vehicle.inspections.0;
    let inspection_section = InspectionSection {
        next_due: inspection_service::next_due_for_display(
            Some(vehicle.purchase_date),
            &inspections,
            today,
        ),
        status: inspection_service::status(Some(vehicle.purchase_date), &inspections, today),
        entries: {
            let mut entries = inspections;
            entries.sort_by(|a, b| b.date.cmp(&a.date));
            entries
        },
    };

    let service_entries = {
        let mut entries = vehicle.service_entries.0;
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    };

    VehicleDetailResponse {
        plate: vehicle.plate,
        make: vehicle.make,
        model: vehicle.model,
        year: vehicle.year,
        color: vehicle.color,
        purchase_price: vehicle.purchase_price,
        purchase_date: vehicle.purchase_date,
        sale_price: vehicle.sale_price,
        sale_date: vehicle.sale_date,
        owner: vehicle.owner.0,
        co_owners: vehicle.co_owners.0,
        insurances: InsuranceSection { active, history },
        service_entries,
        inspections: inspection_section,
        created_at: vehicle.created_at,
    }
}

pub struct VehicleController {
    repository: VehicleRepository,
    persons: PersonRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            persons: PersonRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        request.validate()?;
        validate_license_plate(&request.plate).map_err(|e| field_error("plate", e))?;

        let plate = request.plate.trim().to_uppercase();

        // Verificar que la matrícula no exista
        if self.repository.plate_exists(&plate).await? {
            return Err(AppError::Conflict(
                "La matrícula ya está registrada".to_string(),
            ));
        }

        // El propietario debe estar registrado previamente
        let owner = self
            .persons
            .find_by_id(request.owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Propietario no encontrado".to_string()))?;

        let vehicle = Vehicle {
            plate,
            make: request.make.trim().to_uppercase(),
            model: request.model.trim().to_uppercase(),
            year: request.year,
            color: request.color.trim().to_uppercase(),
            purchase_price: request.purchase_price,
            purchase_date: request.purchase_date,
            sale_price: None,
            sale_date: None,
            owner: sqlx::types::Json(PersonRef::from(owner)),
            co_owners: sqlx::types::Json(Vec::new()),
            insurances: sqlx::types::Json(Vec::new()),
            service_entries: sqlx::types::Json(Vec::new()),
            inspections: sqlx::types::Json(Vec::new()),
            created_at: Utc::now(),
        };

        let created = self.repository.create(&vehicle).await?;

        Ok(ApiResponse::success_with_message(
            build_detail_response(created),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_plate(&self, plate: &str) -> Result<VehicleDetailResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_plate(plate)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(build_detail_response(vehicle))
    }

    pub async fn list(&self) -> Result<Vec<VehicleSummaryResponse>, AppError> {
        let vehicles = self.repository.list_all().await?;

        Ok(vehicles.into_iter().map(VehicleSummaryResponse::from).collect())
    }

    pub async fn update_registry(
        &self,
        plate: &str,
        request: UpdateRegistryRequest,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        request.validate()?;

        self.repository
            .patch_registry(
                plate,
                request.make.map(|v| v.trim().to_uppercase()),
                request.model.map(|v| v.trim().to_uppercase()),
                request.year,
                request.color.map(|v| v.trim().to_uppercase()),
                request.purchase_price,
                request.purchase_date,
                request.sale_price,
                request.sale_date,
            )
            .await?;

        // releer para resincronizar los campos derivados
        let refreshed = self
            .repository
            .find_by_plate(plate)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(ApiResponse::success_with_message(
            build_detail_response(refreshed),
            "Modificaciones guardadas con éxito".to_string(),
        ))
    }

    pub async fn delete(&self, plate: &str) -> Result<(), AppError> {
        self.repository.delete(plate).await
    }
}
