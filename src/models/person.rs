//! Modelo de Person
//!
//! Una persona se identifica por su código fiscal (clave natural única,
//! siempre en mayúsculas) y por un id opaco asignado al crearla. Puede ser
//! propietaria de un vehículo o coproprietaria de varios; nunca se borra.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::timestamp::flexible_date_opt;

/// Person principal - mapea a la tabla persons
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub tax_code: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub license_year: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Datos de una persona todavía sin id (el repositorio lo asigna)
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub tax_code: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub license_year: Option<i32>,
}

/// Referencia a persona embebida en el documento del vehículo.
/// Los opcionales viajan como null explícito, nunca ausentes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRef {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub tax_code: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, with = "flexible_date_opt")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub license_year: Option<i32>,
}

impl From<Person> for PersonRef {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            first_name: person.first_name,
            last_name: person.last_name,
            tax_code: person.tax_code,
            email: person.email,
            birth_date: person.birth_date,
            license_year: person.license_year,
        }
    }
}
