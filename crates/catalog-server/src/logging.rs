//! Tracing subscriber setup.

use catalog_config::ObservabilityConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the filter: `RUST_LOG` wins, otherwise the configured level with
/// debug output for the catalog crates.
fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{level},catalog={level},tower_http=debug,sqlx=warn",
            level = config.log_level
        ))
    })
}

/// Installs the global subscriber, pretty or JSON per configuration.
/// A second call is a no-op.
pub fn init_logging(config: &ObservabilityConfig) {
    let registry = tracing_subscriber::registry().with(build_filter(config));

    let result = if config.json_logs() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!(format = %config.log_format, level = %config.log_level, "Logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        let config = ObservabilityConfig::default();
        init_logging(&config);
        init_logging(&ObservabilityConfig {
            log_format: "json".to_string(),
            ..config
        });
    }
}
