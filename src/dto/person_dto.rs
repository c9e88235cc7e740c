use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::person::Person;

// Request para registrar una persona
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPersonRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    pub tax_code: String,

    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,

    #[validate(range(min = 1900, max = 2100))]
    pub license_year: Option<i32>,
}

// Request para actualizar el perfil: los nombres se sustituyen siempre,
// los opcionales se reescriben en bloque (omitir = limpiar)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePersonRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,

    #[validate(range(min = 1900, max = 2100))]
    pub license_year: Option<i32>,
}

// Response de persona
#[derive(Debug, Serialize)]
pub struct PersonResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub tax_code: String,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub license_year: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            first_name: person.first_name,
            last_name: person.last_name,
            tax_code: person.tax_code,
            email: person.email,
            birth_date: person.birth_date,
            license_year: person.license_year,
            created_at: person.created_at,
        }
    }
}
