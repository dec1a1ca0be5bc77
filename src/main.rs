use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vehicle_rental::config::{DatabaseConfig, EnvironmentConfig};
use vehicle_rental::database::DatabaseConnection;
use vehicle_rental::{create_app_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Vehicle Rental - Reservation Engine");

    let config = EnvironmentConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let db = match DatabaseConnection::new(&db_config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Could not connect to the database: {}", e);
            return Err(e.into());
        }
    };
    db.run_migrations().await?;

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app_router(AppState::new(db.pool().clone(), config));

    info!("🌐 Listening on http://{}", addr);
    info!("   GET  /health");
    info!("   GET  /api/vehicles/search?startDate=&endDate=&typeId=");
    info!("   GET  /api/vehicles/:id");
    info!("   POST /api/rentals/book");
    info!("   PUT  /api/rentals/:id/activate");
    info!("   PUT  /api/rentals/return/:id");
    info!("   GET  /api/rentals/:id");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.pool().close().await;
    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("🛑 Ctrl+C received, shutting down"),
        _ = terminate => info!("🛑 SIGTERM received, shutting down"),
    }
}
