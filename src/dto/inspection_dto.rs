use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::models::inspection::InspectionOutcome;

// Request para registrar una revisión
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInspectionRequest {
    pub date: NaiveDate,
    pub mileage: i64,
    pub outcome: InspectionOutcome,
    pub notes: Option<String>,
}

// Request para editar una revisión existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInspectionRequest {
    pub date: NaiveDate,
    pub mileage: i64,
    pub outcome: InspectionOutcome,
    pub notes: Option<String>,
}
