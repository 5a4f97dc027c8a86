//! Application builder.

use crate::components::AppComponents;
use crate::startup::print_startup_info;
use catalog_config::AppConfig;
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{DatabasePool, DatabasePoolInterface};
use catalog_rest::{create_router, AppState};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Connects the database, wires the services and serves HTTP until a
    /// shutdown signal arrives.
    pub async fn run(self) -> CatalogResult<()> {
        let config = self.config.unwrap_or_default();

        let database = Arc::new(DatabasePool::new(&config.database).await?);
        if config.database.run_migrations {
            database.run_migrations().await?;
        }

        let components = AppComponents::build(&config, &database)?;
        let state = AppState::new(components.product_service, database.clone());
        let router = create_router(state, &config.server);

        let addr = config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| CatalogError::internal(format!("Failed to bind {}: {}", addr, e)))?;

        print_startup_info(&config);
        info!("Starting REST server on http://{}", addr);

        let served = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| CatalogError::internal(format!("REST server error: {}", e)));

        database.close().await;
        served?;

        info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
