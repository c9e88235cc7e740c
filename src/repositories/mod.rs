//! Repositorios de acceso al store remoto

pub mod person_repository;
pub mod vehicle_repository;
