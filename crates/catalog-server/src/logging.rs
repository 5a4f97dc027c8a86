//! Tracing subscriber setup.

use catalog_config::ObservabilityConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directives, with `{level}` as the base level.
fn default_directives(level: &str) -> String {
    format!("{},catalog=debug,tower_http=debug", level)
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Output is `json` or
/// human-readable `pretty`.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level.to_lowercase())));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    if installed.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives("info"), "info,catalog=debug,tower_http=debug");
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        let config = ObservabilityConfig::default();
        init_logging(&config);
        init_logging(&config);
    }
}
