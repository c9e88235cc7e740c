//! Modelo de Inspection
//!
//! Revisiones periódicas obligatorias del vehículo (columna JSONB
//! `inspections`). La primera toca a los 4 años de la compra y las
//! siguientes cada 2 años desde la última registrada.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::timestamp::flexible_date;

/// Resultado de una revisión
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionOutcome {
    Passed,
    Failed,
}

/// Estado derivado de la revisión de un vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    NotRequired,
    Valid,
    DueSoon,
    Overdue,
}

/// Revisión registrada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    pub id: String,
    #[serde(with = "flexible_date")]
    pub date: NaiveDate,
    pub mileage: i64,
    pub outcome: InspectionOutcome,
    #[serde(default)]
    pub notes: Option<String>,
}
