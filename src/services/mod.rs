//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: las reglas
//! puras de fechas (pólizas activas, próxima revisión), el flujo de
//! copropietarios y el cliente del file store.

pub mod inspection_service;
pub mod insurance_service;
pub mod ownership_service;
pub mod storage_service;
