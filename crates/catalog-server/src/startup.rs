//! Server startup utilities.

use catalog_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
   ____                  _    _____      __        __
  / __ \____ ___  ____  (_)  / ___/___ _/ /____ _ / /___  ____ _
 / / / / __ `__ \/ __ \/ /  / /__/ __ `/ __/ __ `/ / __ \/ __ `/
/ /_/ / / / / / / / / / /  / /__/ /_/ / /_/ /_/ / / /_/ / /_/ /
\____/_/ /_/ /_/_/ /_/_/   \___/\__,_/\__/\__,_/_/\____/\__, /
                                                       /____/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("Environment: {}", config.app.environment);
    info!("REST API:    http://{}/api/v1/products", addr);
    info!("Health:      http://{}/health", addr);
    info!("API Docs:    http://{}/swagger-ui", addr);
    info!(
        "Deadline:    {} ms on {} worker threads",
        config.product.timeout_ms, config.product.worker_threads
    );
    info!("Cache TTL:   {} s", config.cache.ttl_secs);
    info!("{}", separator);
}
