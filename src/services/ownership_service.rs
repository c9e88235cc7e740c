//! Flujo de copropietarios
//!
//! Un candidato a coproprietario no puede ser el propietario ni figurar ya
//! entre los copropietarios (comparación por código fiscal). Si la persona
//! no existe todavía se crea de forma implícita; el alta es idempotente
//! gracias al índice único sobre el código fiscal, así que dos altas
//! concurrentes de la misma persona desconocida no generan duplicados.

use sqlx::PgPool;

use crate::models::person::{NewPerson, PersonRef};
use crate::repositories::person_repository::PersonRepository;
use crate::utils::errors::{field_error, validation_error, AppResult};
use crate::utils::validation::{validate_not_empty, validate_tax_code};

/// Validación pura del candidato contra el estado actual del vehículo.
/// El código fiscal llega ya normalizado en mayúsculas.
pub fn validate_candidate(
    owner: &PersonRef,
    co_owners: &[PersonRef],
    tax_code: &str,
) -> AppResult<()> {
    if owner.tax_code == tax_code {
        return Err(validation_error(
            "tax_code",
            "El código fiscal corresponde al propietario del vehículo",
        ));
    }

    if co_owners.iter().any(|co_owner| co_owner.tax_code == tax_code) {
        return Err(validation_error(
            "tax_code",
            "Esta persona ya figura como coproprietaria",
        ));
    }

    Ok(())
}

/// Filtrar la colección de copropietarios por desigualdad de código fiscal
pub fn remove_co_owner(co_owners: &[PersonRef], tax_code: &str) -> Vec<PersonRef> {
    let tax_code = tax_code.trim().to_uppercase();
    co_owners
        .iter()
        .filter(|co_owner| co_owner.tax_code != tax_code)
        .cloned()
        .collect()
}

pub struct OwnershipService {
    persons: PersonRepository,
}

impl OwnershipService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            persons: PersonRepository::new(pool),
        }
    }

    /// Resolver la identidad del candidato: valida contra propietario y
    /// copropietarios actuales y reutiliza la persona existente o la crea
    /// (find-or-create idempotente). Devuelve la referencia a embeber.
    pub async fn resolve_co_owner(
        &self,
        owner: &PersonRef,
        co_owners: &[PersonRef],
        first_name: &str,
        last_name: &str,
        tax_code: &str,
    ) -> AppResult<PersonRef> {
        let tax_code = tax_code.trim().to_uppercase();
        let first_name = first_name.trim().to_uppercase();
        let last_name = last_name.trim().to_uppercase();

        validate_not_empty(&first_name).map_err(|e| field_error("first_name", e))?;
        validate_not_empty(&last_name).map_err(|e| field_error("last_name", e))?;
        validate_tax_code(&tax_code).map_err(|e| field_error("tax_code", e))?;

        validate_candidate(owner, co_owners, &tax_code)?;

        let person = self
            .persons
            .find_or_create(&NewPerson {
                first_name,
                last_name,
                tax_code,
                email: None,
                birth_date: None,
                license_year: None,
            })
            .await?;

        Ok(PersonRef::from(person))
    }
}
