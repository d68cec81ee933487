//! Configuration loader with layered sources.

use crate::validation::{format_validation_errors, ConfigValidator};
use crate::AppConfig;
use catalog_core::CatalogError;
use config::{Config, ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix of environment variables that override file configuration.
pub const ENV_PREFIX: &str = "MUSIC_CATALOG";

/// Loads [`AppConfig`] from layered sources.
///
/// Sources are applied in order, later ones overriding earlier ones:
/// 1. built-in defaults
/// 2. `{dir}/default.toml`
/// 3. `{dir}/{environment}.toml`
/// 4. `{dir}/local.toml` (not committed to version control)
/// 5. environment variables such as `MUSIC_CATALOG__SERVER__REST_PORT=9000`
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    environment: String,
    read_env: bool,
}

impl ConfigLoader {
    /// Creates a loader reading from `config_dir`. The environment name comes
    /// from `MUSIC_CATALOG_ENVIRONMENT` and defaults to `development`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        let environment = std::env::var(format!("{ENV_PREFIX}_ENVIRONMENT"))
            .unwrap_or_else(|_| "development".to_string());
        Self {
            config_dir: config_dir.into(),
            environment,
            read_env: true,
        }
    }

    /// Loader for the default location (`./config`).
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Overrides the environment name used to pick `{environment}.toml`.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Skips environment variables, reading files only.
    #[must_use]
    pub fn without_env_overrides(mut self) -> Self {
        self.read_env = false;
        self
    }

    /// Loads, deserializes and validates the configuration.
    pub fn load(&self) -> Result<AppConfig, CatalogError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        info!("Loading configuration for environment: {}", self.environment);

        let mut builder = Config::builder();

        for name in ["default", self.environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{name}.toml"));
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        if self.read_env {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            );
        }

        let mut app_config: AppConfig = builder
            .build()
            .and_then(|c| c.try_deserialize::<AppConfig>())
            .map_err(config_error_to_catalog_error)?;
        app_config.app.environment.clone_from(&self.environment);

        ConfigValidator::validate(&app_config)
            .map_err(|errors| CatalogError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

fn config_error_to_catalog_error(err: ConfigError) -> CatalogError {
    CatalogError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServerConfig;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.rest_port, 8080);
        assert_eq!(config.cache.author_musics_ttl_secs, 300);
        assert_eq!(config.cache.sweep_interval_secs, 3600);
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig::default();
        assert_eq!(config.rest_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::new(dir.path())
            .with_environment("test")
            .without_env_overrides()
            .load()
            .unwrap();
        assert_eq!(config.server.rest_port, 8080);
        assert_eq!(config.app.environment, "test");
    }

    #[test]
    fn test_environment_file_overrides_default_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[server]\nrest_port = 9000\n\n[cache]\nkey_prefix = \"from-default\"\n",
        )
        .unwrap();
        fs::write(dir.path().join("staging.toml"), "[server]\nrest_port = 9100\n").unwrap();

        let config = ConfigLoader::new(dir.path())
            .with_environment("staging")
            .without_env_overrides()
            .load()
            .unwrap();

        assert_eq!(config.server.rest_port, 9100);
        assert_eq!(config.cache.key_prefix, "from-default");
        assert_eq!(config.cache.author_musics_ttl_secs, 300);
    }

    #[test]
    fn test_invalid_file_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[cache]\nsweep_interval_secs = 0\n").unwrap();

        let err = ConfigLoader::new(dir.path())
            .with_environment("test")
            .without_env_overrides()
            .load()
            .unwrap_err();

        assert!(matches!(err, CatalogError::Configuration(msg) if msg.contains("sweep_interval_secs")));
    }

    #[test]
    fn test_shipped_default_file_matches_built_in_defaults() {
        let shipped: AppConfig = toml::from_str(include_str!("../../../config/default.toml")).unwrap();
        let built_in = AppConfig::default();

        assert_eq!(shipped.server.rest_addr(), built_in.server.rest_addr());
        assert_eq!(shipped.database.url, built_in.database.url);
        assert_eq!(shipped.redis.url, built_in.redis.url);
        assert_eq!(shipped.cache.key_prefix, built_in.cache.key_prefix);
        assert_eq!(shipped.cache.author_musics_ttl_secs, built_in.cache.author_musics_ttl_secs);
        assert_eq!(shipped.cache.sweep_interval_secs, built_in.cache.sweep_interval_secs);
        assert!(ConfigValidator::validate(&shipped).is_ok());
    }
}
