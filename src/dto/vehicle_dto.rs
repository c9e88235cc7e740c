use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::inspection::{Inspection, InspectionStatus};
use crate::models::insurance::InsurancePolicy;
use crate::models::person::PersonRef;
use crate::models::service_entry::ServiceEntry;
use crate::models::vehicle::Vehicle;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    pub plate: String,

    #[validate(length(min = 1, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(length(min = 1, max = 50))]
    pub color: String,

    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,

    // propietario ya registrado
    pub owner_id: Uuid,
}

// Request para actualizar la ficha (solo campos escalares)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRegistryRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    #[validate(length(min = 1, max = 50))]
    pub color: Option<String>,

    pub purchase_price: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub sale_price: Option<Decimal>,
    pub sale_date: Option<NaiveDate>,
}

// Response de vehículo para listados
#[derive(Debug, Serialize)]
pub struct VehicleSummaryResponse {
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub purchase_date: NaiveDate,
    pub owner: PersonRef,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleSummaryResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            plate: vehicle.plate,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            color: vehicle.color,
            purchase_date: vehicle.purchase_date,
            owner: vehicle.owner.0,
            created_at: vehicle.created_at,
        }
    }
}

// Una póliza junto a sus flags derivados para la vista
#[derive(Debug, Serialize)]
pub struct PolicyView {
    pub policy: InsurancePolicy,
    pub due_soon: bool,
    pub expired: bool,
}

// Sección de seguros: activa + histórico ordenado
#[derive(Debug, Serialize)]
pub struct InsuranceSection {
    pub active: Option<PolicyView>,
    pub history: Vec<PolicyView>,
}

// Sección de revisiones: historial + estado derivado
#[derive(Debug, Serialize)]
pub struct InspectionSection {
    pub entries: Vec<Inspection>,
    pub next_due: Option<NaiveDate>,
    pub status: InspectionStatus,
}

// Response de detalle con los estados derivados ya calculados
#[derive(Debug, Serialize)]
pub struct VehicleDetailResponse {
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
    pub sale_price: Option<Decimal>,
    pub sale_date: Option<NaiveDate>,
    pub owner: PersonRef,
    pub co_owners: Vec<PersonRef>,
    pub insurances: InsuranceSection,
    pub service_entries: Vec<ServiceEntry>,
    pub inspections: InspectionSection,
    pub created_at: DateTime<Utc>,
}

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
