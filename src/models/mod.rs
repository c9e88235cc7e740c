//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos. Los vehículos mapean a la
//! tabla `vehicles` (una fila por vehículo, colecciones anidadas en JSONB) y
//! las personas a la tabla `persons`.

pub mod inspection;
pub mod insurance;
pub mod person;
pub mod service_entry;
pub mod timestamp;
pub mod vehicle;

/// Generar el id opaco de una entrada anidada (basado en el reloj,
/// milisegundos desde epoch)
pub fn generate_entry_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}
