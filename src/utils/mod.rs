//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! fechas y normalización de documentos salientes.

pub mod dates;
pub mod errors;
pub mod sanitize;
pub mod validation;
