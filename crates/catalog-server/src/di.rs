//! Dependency injection module using Shaku.
//!
//! `CatalogModule` wires the MySQL pool, both repositories, the cache and the
//! two services. The cache is Redis-backed when Redis is enabled and an
//! in-process map otherwise.

use catalog_config::{AppConfig, RedisConfig};
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{
    AuthorRepository, DatabasePool, DatabasePoolInterface, DatabasePoolParameters,
    MusicRepository, MySqlAuthorRepository, MySqlMusicRepository,
};
use catalog_service::{
    AuthorService, AuthorServiceComponent, AuthorServiceComponentParameters, CacheInterface,
    InMemoryCacheService, MusicService, MusicServiceComponent, RedisCacheService,
    RedisCacheServiceParameters,
};
use deadpool_redis::{PoolConfig, Runtime};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

module! {
    pub CatalogModule {
        components = [
            DatabasePool,
            MySqlAuthorRepository,
            MySqlMusicRepository,
            RedisCacheService,
            AuthorServiceComponent,
            MusicServiceComponent,
        ],
        providers = [],
    }
}

/// Builds the application module around an already connected pool.
pub fn build_catalog_module(
    db_pool: &DatabasePool,
    config: &AppConfig,
) -> CatalogResult<Arc<CatalogModule>> {
    let cache_pool = create_redis_pool(&config.redis)?;
    let redis_enabled = cache_pool.is_some();

    let mut builder = CatalogModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
            pool: cache_pool,
        })
        .with_component_parameters::<AuthorServiceComponent>(
            AuthorServiceComponentParameters::from(&config.cache),
        );

    if !redis_enabled {
        info!("Redis disabled, using the in-process cache");
        builder = builder
            .with_component_override::<dyn CacheInterface>(Box::new(InMemoryCacheService::new()));
    }

    Ok(Arc::new(builder.build()))
}

/// Creates the Redis pool, or `None` when Redis is disabled.
fn create_redis_pool(config: &RedisConfig) -> CatalogResult<Option<Arc<deadpool_redis::Pool>>> {
    if !config.enabled {
        return Ok(None);
    }

    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(PoolConfig::new(config.pool_size as usize));
    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| CatalogError::Cache(format!("Failed to create Redis pool: {e}")))?;

    info!("Redis cache pool created");
    Ok(Some(Arc::new(pool)))
}

/// Resolves the pieces of [`CatalogModule`] the server needs by name.
pub trait CatalogResolver {
    fn author_service(&self) -> Arc<dyn AuthorService>;
    fn music_service(&self) -> Arc<dyn MusicService>;
    fn cache(&self) -> Arc<dyn CacheInterface>;
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl CatalogResolver for CatalogModule {
    fn author_service(&self) -> Arc<dyn AuthorService> {
        self.resolve()
    }

    fn music_service(&self) -> Arc<dyn MusicService> {
        self.resolve()
    }

    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }

    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}
