//! Controllers de la API
//!
//! Orquestan cada operación: validar, mutar la colección en memoria,
//! enviar el patch parcial y releer el registro antes de responder.

pub mod co_owner_controller;
pub mod inspection_controller;
pub mod insurance_controller;
pub mod person_controller;
pub mod service_entry_controller;
pub mod vehicle_controller;
