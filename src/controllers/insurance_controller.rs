use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::controllers::vehicle_controller::build_detail_response;
use crate::dto::insurance_dto::{CreateInsuranceRequest, DocumentUpload, UpdateInsuranceRequest};
use crate::dto::vehicle_dto::{ApiResponse, VehicleDetailResponse};
use crate::models::insurance::{InsurancePolicy, PolicyDocument};
use crate::models::vehicle::Vehicle;
use crate::models::generate_entry_id;
use crate::repositories::vehicle_repository::{VehicleCollection, VehicleRepository};
use crate::services::insurance_service;
use crate::services::storage_service::StorageService;
use crate::utils::errors::AppError;
use crate::utils::sanitize;

pub struct InsuranceController {
    repository: VehicleRepository,
    storage: StorageService,
}

impl InsuranceController {
    pub fn new(pool: PgPool, storage: StorageService) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
            storage,
        }
    }

    pub async fn create(
        &self,
        plate: &str,
        request: CreateInsuranceRequest,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        request.validate()?;

        let vehicle = self.find_vehicle(plate).await?;

        // orden de fechas + solapamiento, solo en el alta
        insurance_service::validate_new_policy(
            request.start_date,
            request.end_date,
            &vehicle.insurances.0,
        )?;

        let policy_id = generate_entry_id();

        // el adjunto se decodifica y comprueba antes de nada: un archivo
        // inválido o demasiado grande aborta el alta completa
        let pending_document = match request.document {
            Some(upload) => Some(self.decode_document(upload)?),
            None => None,
        };

        let mut message = "Póliza creada exitosamente".to_string();
        let document = match pending_document {
            Some((file_name, bytes)) => {
                match self.upload_document(plate, &policy_id, &file_name, bytes).await {
                    Ok(document) => Some(document),
                    Err(e) => {
                        // fallo del file store: se guarda la póliza sin adjunto
                        tracing::warn!("Error subiendo documento de póliza: {}", e);
                        message =
                            "Póliza guardada sin el documento adjunto (fallo al subir el archivo)"
                                .to_string();
                        None
                    }
                }
            }
            None => None,
        };

        let policy = InsurancePolicy {
            id: policy_id,
            company: request.company.trim().to_uppercase(),
            policy_number: request.policy_number.trim().to_uppercase(),
            start_date: request.start_date,
            end_date: request.end_date,
            annual_cost: request.annual_cost.unwrap_or(Decimal::ZERO),
            coverages: normalize_coverages(request.coverages),
            document,
        };

        let mut insurances = vehicle.insurances.0;
        insurances.push(policy);

        self.patch_and_reload(plate, &insurances, message).await
    }

    pub async fn update(
        &self,
        plate: &str,
        policy_id: &str,
        request: UpdateInsuranceRequest,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        request.validate()?;
        insurance_service::validate_date_order(request.start_date, request.end_date)?;

        let vehicle = self.find_vehicle(plate).await?;
        let mut insurances = vehicle.insurances.0;

        let entry = insurances
            .iter_mut()
            .find(|policy| policy.id == policy_id)
            .ok_or_else(|| AppError::NotFound("Póliza no encontrada".to_string()))?;

        entry.company = request.company.trim().to_uppercase();
        entry.policy_number = request.policy_number.trim().to_uppercase();
        entry.start_date = request.start_date;
        entry.end_date = request.end_date;
        entry.annual_cost = request.annual_cost.unwrap_or(Decimal::ZERO);
        entry.coverages = normalize_coverages(request.coverages);
        // el documento adjunto no se toca en la edición

        self.patch_and_reload(plate, &insurances, "Póliza actualizada exitosamente".to_string())
            .await
    }

    pub async fn delete(
        &self,
        plate: &str,
        policy_id: &str,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        let vehicle = self.find_vehicle(plate).await?;
        let mut insurances = vehicle.insurances.0;

        let position = insurances
            .iter()
            .position(|policy| policy.id == policy_id)
            .ok_or_else(|| AppError::NotFound("Póliza no encontrada".to_string()))?;

        let removed = insurances.remove(position);
        if let Some(document) = removed.document {
            self.delete_blob_best_effort(&document.url).await;
        }

        self.patch_and_reload(plate, &insurances, "Póliza eliminada exitosamente".to_string())
            .await
    }

    pub async fn upload_policy_document(
        &self,
        plate: &str,
        policy_id: &str,
        upload: DocumentUpload,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        upload.validate()?;

        let vehicle = self.find_vehicle(plate).await?;
        let mut insurances = vehicle.insurances.0;

        let entry = insurances
            .iter_mut()
            .find(|policy| policy.id == policy_id)
            .ok_or_else(|| AppError::NotFound("Póliza no encontrada".to_string()))?;

        let (file_name, bytes) = self.decode_document(upload)?;
        let document = self.upload_document(plate, policy_id, &file_name, bytes).await?;

        // al reemplazar, el blob anterior se borra en segundo plano lógico
        let previous = entry.document.replace(document);
        if let Some(old) = previous {
            self.delete_blob_best_effort(&old.url).await;
        }

        self.patch_and_reload(plate, &insurances, "Documento subido exitosamente".to_string())
            .await
    }

    pub async fn delete_policy_document(
        &self,
        plate: &str,
        policy_id: &str,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        let vehicle = self.find_vehicle(plate).await?;
        let mut insurances = vehicle.insurances.0;

        let entry = insurances
            .iter_mut()
            .find(|policy| policy.id == policy_id)
            .ok_or_else(|| AppError::NotFound("Póliza no encontrada".to_string()))?;

        let document = entry
            .document
            .take()
            .ok_or_else(|| AppError::NotFound("La póliza no tiene documento adjunto".to_string()))?;

        self.delete_blob_best_effort(&document.url).await;

        self.patch_and_reload(plate, &insurances, "Documento eliminado exitosamente".to_string())
            .await
    }

    async fn find_vehicle(&self, plate: &str) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_plate(plate)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))
    }

    async fn patch_and_reload(
        &self,
        plate: &str,
        insurances: &[InsurancePolicy],
        message: String,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        let document = sanitize::to_store_value(&insurances)?;
        self.repository
            .patch_collection(plate, VehicleCollection::Insurances, document)
            .await?;

        let refreshed = self.find_vehicle(plate).await?;
        Ok(ApiResponse::success_with_message(
            build_detail_response(refreshed),
            message,
        ))
    }

    fn decode_document(&self, upload: DocumentUpload) -> Result<(String, Vec<u8>), AppError> {
        let bytes = BASE64
            .decode(upload.content_base64.as_bytes())
            .map_err(|_| AppError::BadRequest("El documento adjunto no es base64 válido".to_string()))?;
        StorageService::check_size(bytes.len())?;
        Ok((upload.file_name, bytes))
    }

    async fn upload_document(
        &self,
        plate: &str,
        policy_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<PolicyDocument, AppError> {
        let plate = plate.to_uppercase();
        let path = StorageService::policy_document_path(&plate, policy_id, file_name);
        let size_bytes = bytes.len() as i64;
        let url = self.storage.upload(bytes, &path).await?;

        Ok(PolicyDocument {
            file_name: file_name.to_string(),
            url,
            size_bytes,
            uploaded_at: Utc::now(),
        })
    }

    async fn delete_blob_best_effort(&self, url: &str) {
        let Some(path) = self.storage.path_from_url(url) else {
            tracing::warn!("URL de documento fuera del file store: {}", url);
            return;
        };
        if let Err(e) = self.storage.delete(&path).await {
            tracing::warn!("Error borrando documento {}: {}", path, e);
        }
    }
}

/// Normalizar etiquetas de cobertura: trim, mayúsculas, sin vacíos
fn normalize_coverages(coverages: Option<Vec<String>>) -> Vec<String> {
    coverages
        .unwrap_or_default()
        .into_iter()
        .map(|coverage| coverage.trim().to_uppercase())
        .filter(|coverage| !coverage.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_coverages() {
        let raw = Some(vec![
            " rca ".to_string(),
            "Furto".to_string(),
            "   ".to_string(),
        ]);
        assert_eq!(normalize_coverages(raw), vec!["RCA", "FURTO"]);
        assert!(normalize_coverages(None).is_empty());
    }
}
