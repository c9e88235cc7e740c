pub mod co_owner_routes;
pub mod inspection_routes;
pub mod insurance_routes;
pub mod person_routes;
pub mod service_routes;
pub mod vehicle_routes;
