//! Cliente del file store
//!
//! Los documentos de las pólizas viven en un blob store HTTP externo. El
//! cliente sube y borra binarios por path; el límite de 5 MB se comprueba
//! antes de intentar la subida. No hay reintentos: un fallo se reporta y el
//! caller decide (al crear una póliza, se guarda sin adjunto).

use chrono::Utc;

use crate::utils::errors::{validation_error, AppError, AppResult};

/// Tamaño máximo de documento adjunto
pub const MAX_FILE_SIZE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Clone)]
pub struct StorageService {
    base_url: String,
    client: reqwest::Client,
}

impl StorageService {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Rechazar archivos por encima del límite antes de tocar la red
    pub fn check_size(size: usize) -> AppResult<()> {
        if size > MAX_FILE_SIZE_BYTES {
            return Err(validation_error(
                "document",
                "El archivo supera el límite de 5 MB",
            ));
        }
        Ok(())
    }

    /// Subir un binario y devolver la URL pública resultante
    pub async fn upload(&self, bytes: Vec<u8>, path: &str) -> AppResult<String> {
        Self::check_size(bytes.len())?;

        let url = self.url_for(path);
        self.client
            .put(&url)
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error uploading file: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::ExternalApi(format!("Error uploading file: {}", e)))?;

        log::info!("📄 Documento subido a '{}'", path);
        Ok(url)
    }

    /// Borrar un binario por path
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let url = self.url_for(path);
        self.client
            .delete(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error deleting file: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::ExternalApi(format!("Error deleting file: {}", e)))?;

        log::info!("🗑 Documento borrado: '{}'", path);
        Ok(())
    }

    /// Path único para el documento de una póliza:
    /// insurances/{matrícula}/{id de póliza}_{timestamp}.{extensión}
    pub fn policy_document_path(plate: &str, policy_id: &str, file_name: &str) -> String {
        let timestamp = Utc::now().timestamp_millis();
        let extension = file_name.rsplit('.').next().unwrap_or("bin");
        format!("insurances/{}/{}_{}.{}", plate, policy_id, timestamp, extension)
    }

    /// Recuperar el path de un documento a partir de su URL (para borrarlo)
    pub fn path_from_url(&self, url: &str) -> Option<String> {
        let rest = url.strip_prefix(&self.base_url)?.trim_start_matches('/');
        if rest.is_empty() {
            return None;
        }
        let decoded = urlencoding::decode(rest).ok()?;
        Some(decoded.into_owned())
    }

    fn url_for(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/{}", self.base_url, encoded.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_size_cap() {
        assert!(StorageService::check_size(MAX_FILE_SIZE_BYTES).is_ok());
        assert!(StorageService::check_size(MAX_FILE_SIZE_BYTES + 1).is_err());
    }

    #[test]
    fn test_policy_document_path_shape() {
        let path = StorageService::policy_document_path("AB123CD", "1718000000000", "polizza.pdf");
        assert!(path.starts_with("insurances/AB123CD/1718000000000_"));
        assert!(path.ends_with(".pdf"));
    }

    #[test]
    fn test_policy_document_path_without_extension() {
        let path = StorageService::policy_document_path("AB123CD", "1", "polizza");
        assert!(path.ends_with(".polizza"));
    }

    #[test]
    fn test_path_from_url_round_trip() {
        let storage = StorageService::new("https://files.example.com/".to_string());
        let url = storage.url_for("insurances/AB123CD/1_2.pdf");
        assert_eq!(
            storage.path_from_url(&url).as_deref(),
            Some("insurances/AB123CD/1_2.pdf")
        );
    }

    #[test]
    fn test_path_from_url_foreign_url() {
        let storage = StorageService::new("https://files.example.com".to_string());
        assert_eq!(storage.path_from_url("https://other.example.com/x.pdf"), None);
    }
}
