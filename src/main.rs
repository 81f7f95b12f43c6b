use anyhow::Result;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;
use std::net::SocketAddr;

use virtual_garage::config::environment::EnvironmentConfig;
use virtual_garage::database::connection::create_pool;
use virtual_garage::routes::create_router;
use virtual_garage::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Garaje Virtual - Backend API");
    info!("================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let app_state = AppState::new(pool, config);
    let app = create_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Endpoints - Auth:");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login usuario");
    info!("🚗 Endpoints - Vehicles:");
    info!("   GET  /api/vehicles - Listar vehículos visibles (propios + compartidos)");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo (solo propietario)");
    info!("   POST /api/vehicles/:id/share - Compartir vehículo por email");
    info!("   POST /api/vehicles/:id/unshare - Dejar de compartir");
    info!("🔧 Endpoints - Maintenance:");
    info!("   POST /api/vehicles/:id/maintenance - Registrar mantenimiento");
    info!("   GET  /api/vehicles/:id/maintenance - Historial de mantenimiento");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
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
