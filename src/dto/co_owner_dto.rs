use serde::Deserialize;
use validator::Validate;

// Request para añadir un coproprietario. Si la persona no existe todavía
// se crea con estos datos mínimos.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCoOwnerRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    pub tax_code: String,
}
