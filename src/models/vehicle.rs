//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle que mapea a la tabla `vehicles`:
//! una fila por vehículo con la matrícula (en mayúsculas) como primary key
//! natural y las colecciones anidadas en columnas JSONB independientes.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::models::inspection::Inspection;
use crate::models::insurance::InsurancePolicy;
use crate::models::person::PersonRef;
use crate::models::service_entry::ServiceEntry;

/// Vehicle principal - una fila de la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
    pub sale_price: Option<Decimal>,
    pub sale_date: Option<NaiveDate>,
    pub owner: Json<PersonRef>,
    pub co_owners: Json<Vec<PersonRef>>,
    pub insurances: Json<Vec<InsurancePolicy>>,
    pub service_entries: Json<Vec<ServiceEntry>>,
    pub inspections: Json<Vec<Inspection>>,
    pub created_at: DateTime<Utc>,
}
