//! Modelo de InsurancePolicy
//!
//! Las pólizas viven dentro del documento de su vehículo (columna JSONB
//! `insurances`); nunca se comparten entre vehículos. El id es un opaco
//! basado en el reloj, como el resto de entradas anidadas.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::timestamp::{flexible_date, flexible_datetime};

/// Póliza de seguro de un vehículo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    pub id: String,
    pub company: String,
    pub policy_number: String,
    #[serde(with = "flexible_date")]
    pub start_date: NaiveDate,
    #[serde(with = "flexible_date")]
    pub end_date: NaiveDate,
    pub annual_cost: Decimal,
    #[serde(default)]
    pub coverages: Vec<String>,
    // documentos antiguos pueden no traer la clave
    #[serde(default)]
    pub document: Option<PolicyDocument>,
}

/// Descriptor del documento adjunto a una póliza (el binario vive en el
/// file store, aquí solo la referencia)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub file_name: String,
    pub url: String,
    pub size_bytes: i64,
    #[serde(with = "flexible_datetime")]
    pub uploaded_at: DateTime<Utc>,
}
