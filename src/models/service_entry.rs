//! Modelo de ServiceEntry
//!
//! Visitas de taller del vehículo (columna JSONB `service_entries`).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::timestamp::flexible_date;

/// Tipo de intervención
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Ordinary,
    Extraordinary,
}

/// Entrada de mantenimiento / revisión de taller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub id: String,
    #[serde(with = "flexible_date")]
    pub date: NaiveDate,
    pub mileage: i64,
    pub description: String,
    pub cost: Decimal,
    pub kind: ServiceKind,
}
