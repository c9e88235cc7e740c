use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

// Documento adjunto enviado en línea (base64)
#[derive(Debug, Deserialize, Validate)]
pub struct DocumentUpload {
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,

    pub content_base64: String,
}

// Request para crear una póliza
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInsuranceRequest {
    #[validate(length(min = 1, max = 100))]
    pub company: String,

    #[validate(length(min = 1, max = 100))]
    pub policy_number: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    pub annual_cost: Option<Decimal>,

    // etiquetas de cobertura, se normalizan a mayúsculas
    pub coverages: Option<Vec<String>>,

    #[validate]
    pub document: Option<DocumentUpload>,
}

// Request para editar una póliza existente (el documento no se toca aquí)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInsuranceRequest {
    #[validate(length(min = 1, max = 100))]
    pub company: String,

    #[validate(length(min = 1, max = 100))]
    pub policy_number: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    pub annual_cost: Option<Decimal>,
    pub coverages: Option<Vec<String>>,
}
