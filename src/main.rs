use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use std::net::SocketAddr;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use dotenvy::dotenv;
use serde_json::json;

use vehicle_registry::config::environment::EnvironmentConfig;
use vehicle_registry::database::DatabaseConnection;
use vehicle_registry::middleware::cors::cors_middleware_with_origins;
use vehicle_registry::routes;
use vehicle_registry::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging
    let max_level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(max_level).init();

    info!("🚗 Registro de Vehículos - API");
    info!("==============================");

    // Inicializar base de datos (incluye migraciones)
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest(
            "/api/vehicle/:plate/insurances",
            routes::insurance_routes::create_insurance_router(),
        )
        .nest(
            "/api/vehicle/:plate/services",
            routes::service_routes::create_service_router(),
        )
        .nest(
            "/api/vehicle/:plate/inspections",
            routes::inspection_routes::create_inspection_router(),
        )
        .nest(
            "/api/vehicle/:plate/co-owners",
            routes::co_owner_routes::create_co_owner_router(),
        )
        .nest("/api/person", routes::person_routes::create_person_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_middleware_with_origins(config.cors_origins.clone())),
        )
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("🚗 Vehículos:");
    info!("   POST   /api/vehicle - Crear vehículo");
    info!("   GET    /api/vehicle - Listar vehículos");
    info!("   GET    /api/vehicle/:plate - Detalle con estados derivados");
    info!("   PUT    /api/vehicle/:plate/registry - Actualizar ficha");
    info!("   DELETE /api/vehicle/:plate - Eliminar vehículo");
    info!("🛡  Pólizas:");
    info!("   POST   /api/vehicle/:plate/insurances - Añadir póliza");
    info!("   PUT    /api/vehicle/:plate/insurances/:id - Editar póliza");
    info!("   DELETE /api/vehicle/:plate/insurances/:id - Eliminar póliza");
    info!("   POST   /api/vehicle/:plate/insurances/:id/document - Subir documento");
    info!("   DELETE /api/vehicle/:plate/insurances/:id/document - Eliminar documento");
    info!("🔧 Taller y revisiones:");
    info!("   POST   /api/vehicle/:plate/services - Registrar intervención");
    info!("   POST   /api/vehicle/:plate/inspections - Registrar revisión");
    info!("👥 Personas:");
    info!("   POST   /api/person - Registrar persona");
    info!("   GET    /api/person/:id - Obtener persona");
    info!("   GET    /api/person/by-tax-code/:tax_code - Buscar por código fiscal");
    info!("   PUT    /api/person/:id - Actualizar perfil");
    info!("   GET    /api/person/:id/vehicles - Vehículos propios o compartidos");
    info!("👥 Coproprietarios:");
    info!("   POST   /api/vehicle/:plate/co-owners - Añadir coproprietario");
    info!("   DELETE /api/vehicle/:plate/co-owners/:tax_code - Quitar coproprietario");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
