use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// TTL cache for geocoding results
///
/// Keyed by the exact query text, so repeated lookups of the same zip code
/// skip the network round-trip. Entries expire after the configured TTL and
/// are never invalidated early. Only successful resolutions are stored;
/// caching a failure would pin a transient outage for the full TTL.
pub struct GeocodeCache {
    entries: moka::future::Cache<String, GeoPoint>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl GeocodeCache {
    /// Create a new cache with the given capacity and TTL
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a previously cached point
    pub async fn get(&self, query: &str) -> Option<GeoPoint> {
        match self.entries.get(query).await {
            Some(point) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Geocode cache hit: {}", query);
                Some(point)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Geocode cache miss: {}", query);
                None
            }
        }
    }

    /// Store a successful resolution
    pub async fn insert(&self, query: &str, point: GeoPoint) {
        self.entries.insert(query.to_string(), point).await;
        tracing::trace!("Geocode cache set: {}", query);
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hit_count = self.hits.load(Ordering::Relaxed);
        let miss_count = self.misses.load(Ordering::Relaxed);
        let total = hit_count + miss_count;
        let hit_rate = if total > 0 {
            hit_count as f64 / total as f64
        } else {
            0.0
        };

        CacheStats {
            size: self.entries.entry_count(),
            hit_count,
            miss_count,
            hit_rate,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub size: u64,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = GeocodeCache::new(100, 60);
        let point = GeoPoint::new(47.3769, 8.5417);

        assert!(cache.get("8001").await.is_none());

        cache.insert("8001", point).await;
        let cached = cache.get("8001").await;
        assert_eq!(cached, Some(point));
    }

    #[tokio::test]
    async fn test_cache_counts_hits_and_misses() {
        let cache = GeocodeCache::new(100, 60);
        cache.insert("3000", GeoPoint::new(46.9480, 7.4474)).await;

        cache.get("3000").await;
        cache.get("3000").await;
        cache.get("9999").await;

        let stats = cache.stats();
        assert_eq!(stats.hit_count, 2);
        assert_eq!(stats.miss_count, 1);
        assert!((stats.hit_rate - 2.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_cache_expires_entries() {
        let cache = GeocodeCache::new(100, 1);
        cache.insert("8001", GeoPoint::new(47.3769, 8.5417)).await;
        assert!(cache.get("8001").await.is_some());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(cache.get("8001").await.is_none());
    }
}
