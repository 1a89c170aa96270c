use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use car_rental_api::config::environment::EnvironmentConfig;
use car_rental_api::database;
use car_rental_api::routes::create_api_router;
use car_rental_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenvy::dotenv().ok();
    let config = EnvironmentConfig::default();

    // Configurar logging (DEBUG fuera de producción)
    let log_level = if config.is_production() {
        tracing::Level::INFO
    } else {
        tracing::Level::DEBUG
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🚗 Car Rental API");
    info!("=================");

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = database::run_migrations(&pool).await {
        error!("❌ Error ejecutando migraciones: {}", e);
        return Err(e);
    }
    info!("✅ Base de datos lista");

    // Crear router de la API
    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(pool, config);
    let app = create_api_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Auth:");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("🚗 Catálogo:");
    info!("   GET  /api/car - Listar flota");
    info!("   GET  /api/car/available - Coches disponibles por fechas");
    info!("   GET  /api/car/:id - Obtener coche");
    info!("   GET  /api/category - Listar categorías");
    info!("📝 Reservas:");
    info!("   POST /api/booking - Crear reserva");
    info!("   GET  /api/booking - Mis reservas");
    info!("🛠️ Administración (/api/admin):");
    info!("   POST /api/admin/car - Crear coche");
    info!("   PUT  /api/admin/car/:id - Actualizar coche");
    info!("   DELETE /api/admin/car/:id - Eliminar coche");
    info!("   POST /api/admin/category - Crear categoría");
    info!("   PUT  /api/admin/category/:id - Actualizar categoría");
    info!("   DELETE /api/admin/category/:id - Eliminar categoría");
    info!("   GET  /api/admin/user - Listar usuarios");
    info!("   PUT  /api/admin/user/:id - Actualizar usuario");
    info!("   DELETE /api/admin/user/:id - Eliminar usuario");
    info!("   GET  /api/admin/booking - Listar todas las reservas");
    info!("   PUT  /api/admin/booking/:id/status - Cambiar estado de reserva");

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
