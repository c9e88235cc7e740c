use crate::models::person::{NewPerson, Person};
use crate::utils::errors::AppError;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PersonRepository {
    pool: PgPool,
}

impl PersonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, person: &NewPerson) -> Result<Person, AppError> {
        let id = Uuid::new_v4();

        let result = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO persons (id, first_name, last_name, tax_code, email, birth_date, license_year, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#
        )
        .bind(id)
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(person.tax_code.to_uppercase())
        .bind(&person.email)
        .bind(person.birth_date)
        .bind(person.license_year)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating person: {}", e)))?;

        Ok(result)
    }

    /// Alta idempotente por código fiscal: si la persona ya existe se
    /// devuelve la fila existente, sin duplicados aunque dos clientes
    /// intenten crearla a la vez.
    pub async fn find_or_create(&self, person: &NewPerson) -> Result<Person, AppError> {
        let id = Uuid::new_v4();
        let tax_code = person.tax_code.to_uppercase();

        let inserted = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO persons (id, first_name, last_name, tax_code, email, birth_date, license_year, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (tax_code) DO NOTHING
            RETURNING *
            "#
        )
        .bind(id)
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(&tax_code)
        .bind(&person.email)
        .bind(person.birth_date)
        .bind(person.license_year)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating person: {}", e)))?;

        match inserted {
            Some(created) => Ok(created),
            None => {
                // otra inserción ganó la carrera (o ya existía): reutilizar
                self.find_by_tax_code(&tax_code)
                    .await?
                    .ok_or_else(|| AppError::Internal("Person vanished after conflict".to_string()))
            }
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>, AppError> {
        let result = sqlx::query_as::<_, Person>("SELECT * FROM persons WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding person: {}", e)))?;

        Ok(result)
    }

    pub async fn find_by_tax_code(&self, tax_code: &str) -> Result<Option<Person>, AppError> {
        let result = sqlx::query_as::<_, Person>("SELECT * FROM persons WHERE tax_code = $1")
            .bind(tax_code.to_uppercase())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding person by tax code: {}", e)))?;

        Ok(result)
    }

    pub async fn tax_code_exists(&self, tax_code: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM persons WHERE tax_code = $1)")
                .bind(tax_code.to_uppercase())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Error checking tax code: {}", e)))?;

        Ok(result.0)
    }

    /// Actualización de perfil: los nombres se sustituyen siempre, los
    /// opcionales se reescriben en bloque (None limpia el valor guardado)
    pub async fn update_profile(
        &self,
        id: Uuid,
        first_name: String,
        last_name: String,
        email: Option<String>,
        birth_date: Option<NaiveDate>,
        license_year: Option<i32>,
    ) -> Result<Person, AppError> {
        let result = sqlx::query_as::<_, Person>(
            r#"
            UPDATE persons
            SET first_name = $2, last_name = $3, email = $4, birth_date = $5, license_year = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(birth_date)
        .bind(license_year)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating person: {}", e)))?;

        result.ok_or_else(|| AppError::NotFound("Persona no encontrada".to_string()))
    }
}
