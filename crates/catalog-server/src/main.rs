//! # Music Catalog Server
//!
//! Main entry point: loads configuration, connects MySQL, wires the
//! services, starts the cache sweeper and serves the REST API until
//! Ctrl+C or SIGTERM.

use catalog_config::{AppConfig, ConfigLoader, ObservabilityConfig};
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{DatabaseHealthCheck, DatabasePool};
use catalog_rest::{create_router, AppState};
use catalog_server::{
    di::{build_catalog_module, CatalogResolver},
    logging::init_logging,
    startup::{print_banner, print_startup_info},
};
use catalog_service::CacheSweeper;
use std::sync::Arc;
use tokio::{signal, sync::broadcast};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location().load() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    print_banner();

    info!("Starting {} v{}", config.app.name, env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> CatalogResult<()> {
    let db_pool = DatabasePool::connect(&config.database).await?;
    let module = build_catalog_module(&db_pool, &config)?;
    let database = module.database_pool();

    if config.database.run_migrations {
        database.run_migrations().await?;
    }

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let sweeper = CacheSweeper::from_config(module.cache(), &config.cache).spawn(shutdown_rx);

    let state = AppState::new(module.author_service(), module.music_service())
        .with_readiness(Arc::new(DatabaseHealthCheck::new(database.clone())));
    let router = create_router(state, &config.server);

    let rest_addr = config.server.rest_addr();
    let listener = tokio::net::TcpListener::bind(&rest_addr)
        .await
        .map_err(|e| CatalogError::Internal(format!("Failed to bind {rest_addr}: {e}")))?;
    print_startup_info(&config);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CatalogError::Internal(format!("REST server error: {e}")));

    info!("Stopping background tasks...");
    if shutdown_tx.send(()).is_err() {
        warn!("Cache sweeper had already stopped");
    }
    if let Err(e) = sweeper.await {
        warn!("Cache sweeper ended abnormally: {}", e);
    }
    database.close().await;

    served?;
    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
