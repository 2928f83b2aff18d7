//! Versioned precache of the worker's static assets.
pub mod memory;
pub use memory::{CacheSummary, CachedResponse, MemoryCacheStorage};

use anyhow::Result;
use async_trait::async_trait;
use futures::future::try_join_all;

use crate::core::WorkerConfig;

/// Named buckets of request URL to response pairs.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Fetch every URL and store the responses in the named bucket,
    /// creating it if needed. Nothing is stored if any fetch fails.
    async fn add_all(&self, cache_name: &str, urls: &[String]) -> Result<()>;

    /// Names of all buckets, in creation order
    async fn keys(&self) -> Result<Vec<String>>;

    /// Returns false when there was no bucket by that name
    async fn delete(&self, cache_name: &str) -> Result<bool>;
}

/// Populate the current version's bucket. Returns the bucket name.
pub async fn install(storage: &dyn CacheStorage, config: &WorkerConfig) -> Result<String> {
    let cache_name = config.cache_name();
    storage.add_all(&cache_name, &config.precache_urls).await?;
    tracing::debug!(
        "Precached {} urls into {}",
        config.precache_urls.len(),
        cache_name
    );
    Ok(cache_name)
}

/// Delete buckets left behind by other versions of this worker. Buckets
/// without the worker's prefix belong to someone else and are left
/// alone. Returns the deleted names.
pub async fn activate(storage: &dyn CacheStorage, config: &WorkerConfig) -> Result<Vec<String>> {
    let current = config.cache_name();
    let stale: Vec<String> = storage
        .keys()
        .await?
        .into_iter()
        .filter(|name| config.owns_cache(name) && *name != current)
        .collect();

    try_join_all(stale.iter().map(|name| storage.delete(name))).await?;

    for name in &stale {
        tracing::debug!("Deleted stale cache {}", name);
    }
    Ok(stale)
}
