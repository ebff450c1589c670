//! HealthPet Clinic Engine - Main Entry Point
//! JSON-RPC server over the clinic record stores

mod telemetry;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Import workspace crates
use healthpet_api_rpc::{RpcServer, RpcServerConfig};
use healthpet_core::application::{AnimalService, ProfileService, VaccinationService};
use healthpet_core::domain::{DEFAULT_DUE_SOON_WINDOW_DAYS, DEFAULT_UPCOMING_WINDOW_DAYS};
use healthpet_core::port::id_provider::UuidProvider;
use healthpet_core::port::SystemClock;
use healthpet_infra_sqlite::{
    create_pool, run_migrations, SqliteAnimalStore, SqliteProfileStore, SqliteVaccinationStore,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_DB_PATH: &str = "~/.healthpet/clinic.db";

fn env_i64(name: &str, default: i64) -> i64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging (JSON format for production)
    let log_format = std::env::var("HEALTHPET_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("healthpet=info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("HealthPet Clinic Engine v{} starting...", VERSION);

    // 1.1. Initialize OpenTelemetry (optional)
    if let Err(e) = telemetry::init_telemetry() {
        tracing::warn!(error = ?e, "Failed to initialize OpenTelemetry (continuing without it)");
    }

    // 2. Load configuration
    let db_path = std::env::var("HEALTHPET_DB_PATH")
        .unwrap_or_else(|_| shellexpand::tilde(DEFAULT_DB_PATH).into_owned());

    let rpc_port: u16 = std::env::var("HEALTHPET_RPC_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9539);

    let due_soon_days = env_i64("HEALTHPET_DUE_SOON_DAYS", DEFAULT_DUE_SOON_WINDOW_DAYS);
    let upcoming_days = env_i64("HEALTHPET_UPCOMING_DAYS", DEFAULT_UPCOMING_WINDOW_DAYS);

    info!(db_path = %db_path, "Initializing database...");

    // 3. Initialize database
    let pool = create_pool(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    // 4. Setup dependencies (DI wiring)
    let clock = Arc::new(SystemClock);
    let id_provider = Arc::new(UuidProvider);
    let animal_store = Arc::new(SqliteAnimalStore::new(pool.clone()));
    let vaccination_store = Arc::new(SqliteVaccinationStore::new(pool.clone()));
    let profile_store = Arc::new(SqliteProfileStore::new(pool.clone()));

    let animal_service = Arc::new(AnimalService::new(
        animal_store.clone(),
        id_provider.clone(),
        clock.clone(),
    ));
    let vaccination_service = Arc::new(
        VaccinationService::new(
            vaccination_store,
            animal_store.clone(),
            id_provider.clone(),
            clock.clone(),
        )
        .with_windows(due_soon_days, upcoming_days),
    );
    let profile_service = Arc::new(ProfileService::new(
        profile_store,
        animal_store,
        id_provider,
        clock,
    ));

    info!(
        due_soon_days = due_soon_days,
        upcoming_days = upcoming_days,
        "Alert windows configured"
    );

    // 5. Start JSON-RPC server
    info!("Starting JSON-RPC server...");
    let rpc_config = RpcServerConfig {
        port: rpc_port,
        ..Default::default()
    };
    let rpc_server = RpcServer::new(
        rpc_config,
        animal_service,
        vaccination_service,
        profile_service,
    );
    let rpc_handle = rpc_server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!("System ready. Waiting for requests...");
    info!("Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;

    info!("Shutdown complete.");

    Ok(())
}
