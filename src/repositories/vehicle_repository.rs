use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// Colecciones anidadas del documento de un vehículo. El nombre de columna
/// sale de este enum cerrado, nunca de entrada del cliente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleCollection {
    Insurances,
    ServiceEntries,
    Inspections,
    CoOwners,
}

impl VehicleCollection {
    pub fn column(&self) -> &'static str {
        match self {
            VehicleCollection::Insurances => "insurances",
            VehicleCollection::ServiceEntries => "service_entries",
            VehicleCollection::Inspections => "inspections",
            VehicleCollection::CoOwners => "co_owners",
        }
    }
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                plate, make, model, year, color, purchase_price, purchase_date,
                sale_price, sale_date, owner, co_owners, insurances,
                service_entries, inspections, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(vehicle.plate.to_uppercase())
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.color)
        .bind(vehicle.purchase_price)
        .bind(vehicle.purchase_date)
        .bind(vehicle.sale_price)
        .bind(vehicle.sale_date)
        .bind(&vehicle.owner)
        .bind(&vehicle.co_owners)
        .bind(&vehicle.insurances)
        .bind(&vehicle.service_entries)
        .bind(&vehicle.inspections)
        .bind(vehicle.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error creating vehicle: {}", e)))?;

        Ok(result)
    }

    pub async fn find_by_plate(&self, plate: &str) -> Result<Option<Vehicle>, AppError> {
        let result = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE plate = $1")
            .bind(plate.to_uppercase())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error finding vehicle: {}", e)))?;

        Ok(result)
    }

    pub async fn list_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let result = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error listing vehicles: {}", e)))?;

        Ok(result)
    }

    pub async fn plate_exists(&self, plate: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate = $1)")
                .bind(plate.to_uppercase())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::DatabaseError(format!("Error checking plate: {}", e)))?;

        Ok(result.0)
    }

    /// Vehículos donde la persona es propietaria (id embebido en el documento
    /// owner) o figura en el array de copropietarios
    pub async fn list_by_owner_or_co_owner(
        &self,
        person_id: Uuid,
    ) -> Result<Vec<Vehicle>, AppError> {
        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE owner->>'id' = $1
               OR EXISTS (
                   SELECT 1 FROM jsonb_array_elements(co_owners) AS co_owner
                   WHERE co_owner->>'id' = $1
               )
            ORDER BY created_at DESC
            "#,
        )
        .bind(person_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error listing vehicles by person: {}", e)))?;

        Ok(result)
    }

    /// Patch de los campos escalares de la ficha. Los campos no enviados
    /// conservan su valor actual.
    #[allow(clippy::too_many_arguments)]
    pub async fn patch_registry(
        &self,
        plate: &str,
        make: Option<String>,
        model: Option<String>,
        year: Option<i32>,
        color: Option<String>,
        purchase_price: Option<Decimal>,
        purchase_date: Option<NaiveDate>,
        sale_price: Option<Decimal>,
        sale_date: Option<NaiveDate>,
    ) -> Result<Vehicle, AppError> {
        let current = self
            .find_by_plate(plate)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let result = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET make = $2, model = $3, year = $4, color = $5,
                purchase_price = $6, purchase_date = $7, sale_price = $8, sale_date = $9
            WHERE plate = $1
            RETURNING *
            "#,
        )
        .bind(plate.to_uppercase())
        .bind(make.unwrap_or(current.make))
        .bind(model.unwrap_or(current.model))
        .bind(year.unwrap_or(current.year))
        .bind(color.unwrap_or(current.color))
        .bind(purchase_price.unwrap_or(current.purchase_price))
        .bind(purchase_date.unwrap_or(current.purchase_date))
        .bind(sale_price.or(current.sale_price))
        .bind(sale_date.or(current.sale_date))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Error updating vehicle: {}", e)))?;

        Ok(result)
    }

    /// Patch parcial: reescribe únicamente la columna de la colección
    /// indicada, sin tocar el resto de la fila. Así una edición de pólizas
    /// no pisa una edición concurrente de otra colección hermana.
    pub async fn patch_collection(
        &self,
        plate: &str,
        collection: VehicleCollection,
        document: Value,
    ) -> Result<(), AppError> {
        let query = format!(
            "UPDATE vehicles SET {} = $2 WHERE plate = $1",
            collection.column()
        );

        let result = sqlx::query(&query)
            .bind(plate.to_uppercase())
            .bind(document)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error patching vehicle: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        Ok(())
    }

    pub async fn delete(&self, plate: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE plate = $1")
            .bind(plate.to_uppercase())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Error deleting vehicle: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_columns_are_closed_set() {
        assert_eq!(VehicleCollection::Insurances.column(), "insurances");
        assert_eq!(VehicleCollection::ServiceEntries.column(), "service_entries");
        assert_eq!(VehicleCollection::Inspections.column(), "inspections");
        assert_eq!(VehicleCollection::CoOwners.column(), "co_owners");
    }
}
