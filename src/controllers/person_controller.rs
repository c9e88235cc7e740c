use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::person_dto::{PersonResponse, RegisterPersonRequest, UpdatePersonRequest};
use crate::dto::vehicle_dto::{ApiResponse, VehicleSummaryResponse};
use crate::models::person::NewPerson;
use crate::repositories::person_repository::PersonRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{field_error, AppError};
use crate::utils::validation::{validate_email, validate_tax_code};

pub struct PersonController {
    repository: PersonRepository,
    vehicles: VehicleRepository,
}

impl PersonController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PersonRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn register(
        &self,
        request: RegisterPersonRequest,
    ) -> Result<ApiResponse<PersonResponse>, AppError> {
        request.validate()?;
        validate_tax_code(&request.tax_code).map_err(|e| field_error("tax_code", e))?;
        if let Some(email) = request.email.as_deref() {
            validate_email(email).map_err(|e| field_error("email", e))?;
        }

        let tax_code = request.tax_code.trim().to_uppercase();

        // Verificar que el código fiscal no exista
        if self.repository.tax_code_exists(&tax_code).await? {
            return Err(AppError::Conflict(
                "El código fiscal ya está registrado".to_string(),
            ));
        }

        let person = self
            .repository
            .create(&NewPerson {
                first_name: request.first_name.trim().to_uppercase(),
                last_name: request.last_name.trim().to_uppercase(),
                tax_code,
                email: request.email.filter(|email| !email.trim().is_empty()),
                birth_date: request.birth_date,
                license_year: request.license_year,
            })
            .await?;

        Ok(ApiResponse::success_with_message(
            PersonResponse::from(person),
            "Persona registrada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<PersonResponse, AppError> {
        let person = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Persona no encontrada".to_string()))?;

        Ok(PersonResponse::from(person))
    }

    pub async fn get_by_tax_code(&self, tax_code: &str) -> Result<PersonResponse, AppError> {
        let person = self
            .repository
            .find_by_tax_code(tax_code)
            .await?
            .ok_or_else(|| AppError::NotFound("Persona no encontrada".to_string()))?;

        Ok(PersonResponse::from(person))
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        request: UpdatePersonRequest,
    ) -> Result<ApiResponse<PersonResponse>, AppError> {
        request.validate()?;
        if let Some(email) = request.email.as_deref() {
            if !email.trim().is_empty() {
                validate_email(email).map_err(|e| field_error("email", e))?;
            }
        }

        let person = self
            .repository
            .update_profile(
                id,
                request.first_name.trim().to_uppercase(),
                request.last_name.trim().to_uppercase(),
                request.email.filter(|email| !email.trim().is_empty()),
                request.birth_date,
                request.license_year,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            PersonResponse::from(person),
            "Datos actualizados exitosamente".to_string(),
        ))
    }

    /// Vehículos donde la persona es propietaria o coproprietaria
    pub async fn vehicles(&self, id: Uuid) -> Result<Vec<VehicleSummaryResponse>, AppError> {
        // la persona debe existir para distinguir "sin vehículos" de "no existe"
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Persona no encontrada".to_string()))?;

        let vehicles = self.vehicles.list_by_owner_or_co_owner(id).await?;

        Ok(vehicles.into_iter().map(VehicleSummaryResponse::from).collect())
    }
}
