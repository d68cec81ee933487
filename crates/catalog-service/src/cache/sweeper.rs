//! Periodic full sweep of the author-with-musics cache region.

use super::{cache_keys, CacheInterface};
use catalog_config::CacheConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Background task that clears the whole author-with-musics region on a fixed
/// period, independent of the per-entry TTL.
pub struct CacheSweeper {
    cache: Arc<dyn CacheInterface>,
    pattern: String,
    period: Duration,
}

impl CacheSweeper {
    /// Creates a sweeper for the region under `key_prefix`.
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, key_prefix: &str, period: Duration) -> Self {
        Self {
            cache,
            pattern: cache_keys::author_musics_region(key_prefix),
            period,
        }
    }

    /// Creates a sweeper using the configured key prefix and sweep interval.
    #[must_use]
    pub fn from_config(cache: Arc<dyn CacheInterface>, config: &CacheConfig) -> Self {
        Self::new(cache, &config.key_prefix, config.sweep_interval())
    }

    /// Deletes every entry of the region once, returning how many were removed.
    ///
    /// Failures are logged and reported as zero; the next period retries.
    pub async fn sweep_once(&self) -> u64 {
        match self.cache.delete_pattern(&self.pattern).await {
            Ok(deleted) => {
                info!(pattern = %self.pattern, deleted, "Swept author musics cache");
                deleted
            }
            Err(e) => {
                warn!(pattern = %self.pattern, error = %e, "Cache sweep failed");
                0
            }
        }
    }

    /// Spawns the sweep loop. The first sweep runs one period after start; the
    /// loop exits when `shutdown` fires or its sender is dropped.
    pub fn spawn(self, mut shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.period, self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(
                pattern = %self.pattern,
                period_secs = self.period.as_secs(),
                "Cache sweeper started"
            );

            loop {
                tokio::select! {
                    _ = shutdown.recv() => {
                        info!("Cache sweeper received shutdown signal");
                        break;
                    }
                    _ = ticker.tick() => {
                        debug!("Cache sweep tick");
                        self.sweep_once().await;
                    }
                }
            }
        })
    }
}

impl std::fmt::Debug for CacheSweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheSweeper")
            .field("pattern", &self.pattern)
            .field("period", &self.period)
            .finish_non_exhaustive()
    }
}
