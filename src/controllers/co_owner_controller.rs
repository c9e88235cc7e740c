use sqlx::PgPool;
use validator::Validate;

use crate::controllers::vehicle_controller::build_detail_response;
use crate::dto::co_owner_dto::AddCoOwnerRequest;
use crate::dto::vehicle_dto::{ApiResponse, VehicleDetailResponse};
use crate::models::person::PersonRef;
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::{VehicleCollection, VehicleRepository};
use crate::services::ownership_service::{self, OwnershipService};
use crate::utils::errors::AppError;
use crate::utils::sanitize;

pub struct CoOwnerController {
    repository: VehicleRepository,
    ownership: OwnershipService,
}

impl CoOwnerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            ownership: OwnershipService::new(pool),
        }
    }

    pub async fn add(
        &self,
        plate: &str,
        request: AddCoOwnerRequest,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        request.validate()?;

        let vehicle = self.find_vehicle(plate).await?;

        // valida contra propietario y copropietarios, reutiliza o crea la persona
        let co_owner = self
            .ownership
            .resolve_co_owner(
                &vehicle.owner.0,
                &vehicle.co_owners.0,
                &request.first_name,
                &request.last_name,
                &request.tax_code,
            )
            .await?;

        let mut co_owners = vehicle.co_owners.0;
        co_owners.push(co_owner);

        self.patch_and_reload(plate, &co_owners, "Coproprietario añadido exitosamente".to_string())
            .await
    }

    pub async fn remove(
        &self,
        plate: &str,
        tax_code: &str,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        let vehicle = self.find_vehicle(plate).await?;
        let co_owners = vehicle.co_owners.0;

        let filtered = ownership_service::remove_co_owner(&co_owners, tax_code);
        if filtered.len() == co_owners.len() {
            return Err(AppError::NotFound("Coproprietario no encontrado".to_string()));
        }

        self.patch_and_reload(plate, &filtered, "Coproprietario eliminado exitosamente".to_string())
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
        co_owners: &[PersonRef],
        message: String,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        let document = sanitize::to_store_value(&co_owners)?;
        self.repository
            .patch_collection(plate, VehicleCollection::CoOwners, document)
            .await?;

        let refreshed = self.find_vehicle(plate).await?;
        Ok(ApiResponse::success_with_message(
            build_detail_response(refreshed),
            message,
        ))
    }
}
