//! Server startup utilities.

use catalog_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    __  ___           _         ______      __        __
   /  |/  /_  _______(_)____   / ____/___ _/ /_____ _/ /___  ____ _
  / /|_/ / / / / ___/ / ___/  / /   / __ `/ __/ __ `/ / __ \/ __ `/
 / /  / / /_/ (__  ) / /__   / /___/ /_/ / /_/ /_/ / / /_/ / /_/ /
/_/  /_/\__,_/____/_/\___/   \____/\__,_/\__/\__,_/_/\____/\__, /
                                                          /____/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.rest_addr();
    info!("{}", separator);
    info!("REST API:  http://{}/api/v1", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!(
        "Cache:     {} (ttl {}s, sweep every {}s)",
        if config.redis.enabled { "redis" } else { "in-process" },
        config.cache.author_musics_ttl_secs,
        config.cache.sweep_interval_secs
    );
    info!("{}", separator);
}
