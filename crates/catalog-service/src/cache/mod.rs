//! Caching infrastructure for the service layer.
//!
//! A cache abstraction with Redis and in-process backends, plus the
//! background sweeper that periodically clears the author-with-musics region.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;
mod sweeper;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::InMemoryCacheService;
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters};
pub use sweeper::CacheSweeper;
