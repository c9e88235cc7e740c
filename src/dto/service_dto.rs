use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::service_entry::ServiceKind;

// Request para registrar una visita de taller
#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceEntryRequest {
    pub date: NaiveDate,
    pub mileage: i64,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub kind: ServiceKind,
}

// Request para editar una visita existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateServiceEntryRequest {
    pub date: NaiveDate,
    pub mileage: i64,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub kind: ServiceKind,
}
