//! Caching layer for Mesonet data files.
//!
//! Data files for a past time never change, and callers tend to ask for the
//! same station-day several times while exploring it. Responses are kept in
//! a bounded cache keyed by the caller's `(timestamp, station)` pair and
//! evicted least-recently-used first.
//!
//! The cache is safe to share between threads but does not de-duplicate
//! in-flight requests: two concurrent misses for the same key both fetch.

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use moka::policy::EvictionPolicy;
use moka::sync::Cache as MokaCache;
use tracing::{debug, info};

use crate::domain::StationId;
use crate::fetch::{DataRequest, DataSource, FetchError, MesonetClient};

/// Cache key: the requested timestamp and station (absent for snapshots).
pub type FetchKey = (NaiveDateTime, Option<StationId>);

/// Cached file contents.
pub type FileEntry = Arc<[u8]>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached files.
    pub capacity: u64,
}

impl CacheConfig {
    /// Create a config holding at most `capacity` files.
    pub fn new(capacity: u64) -> Self {
        Self { capacity }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 20 }
    }
}

/// Bounded LRU cache of fetched data files.
pub struct FileCache {
    files: MokaCache<FetchKey, FileEntry>,
}

impl FileCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let files = MokaCache::builder()
            .max_capacity(config.capacity)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self { files }
    }

    /// Get a cached file, marking it as most recently used.
    pub fn get(&self, key: &FetchKey) -> Option<FileEntry> {
        self.files.get(key)
    }

    /// Insert a file, evicting the least recently used entry if full.
    pub fn insert(&self, key: FetchKey, entry: FileEntry) {
        self.files.insert(key, entry);
        // Apply the eviction now so the bound holds as soon as insert returns.
        self.files.run_pending_tasks();
    }

    /// Check whether a key is cached without touching its recency.
    pub fn contains(&self, key: &FetchKey) -> bool {
        self.files.contains_key(key)
    }

    /// Number of cached files.
    pub fn entry_count(&self) -> u64 {
        self.files.run_pending_tasks();
        self.files.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.files.invalidate_all();
        self.files.run_pending_tasks();
    }
}

/// Mesonet data source with caching.
///
/// Wraps any [`DataSource`] (the live [`MesonetClient`] by default) and
/// caches the raw bytes it returns.
pub struct CachedMesonetClient<S = MesonetClient> {
    source: S,
    cache: FileCache,
}

impl<S: DataSource> CachedMesonetClient<S> {
    /// Create a new cached client.
    pub fn new(source: S, cache_config: &CacheConfig) -> Self {
        Self {
            source,
            cache: FileCache::new(cache_config),
        }
    }

    /// Fetch a data file, using the cache if available.
    ///
    /// # Arguments
    /// * `timestamp` - Time of interest; defaults to the current UTC time.
    ///   Snapshot requests floor it to 5 minutes, series requests use the date.
    /// * `station` - Station for a time series; `None` fetches a network
    ///   snapshot
    pub fn fetch(
        &self,
        timestamp: Option<NaiveDateTime>,
        station: Option<StationId>,
    ) -> Result<FileEntry, FetchError> {
        let timestamp = timestamp.unwrap_or_else(|| Utc::now().naive_utc());
        let key = (timestamp, station);

        if let Some(cached) = self.cache.get(&key) {
            debug!(%timestamp, station = ?station, "data file cache hit");
            return Ok(cached);
        }

        let request = DataRequest::new(timestamp, station);
        info!(filename = %request.filename(), "fetching data file");

        let entry: FileEntry = Arc::from(self.source.fetch(&request)?);
        self.cache.insert(key, entry.clone());

        Ok(entry)
    }

    /// Access the underlying source for operations that bypass the cache.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Check whether a fetch for this key would be served from cache.
    pub fn is_cached(&self, timestamp: NaiveDateTime, station: Option<StationId>) -> bool {
        self.cache.contains(&(timestamp, station))
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MockMesonetClient;
    use chrono::{NaiveDate, TimeDelta};

    fn base_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2008, 8, 12)
            .unwrap()
            .and_hms_opt(14, 35, 0)
            .unwrap()
    }

    fn stid(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    /// Mock serving 30 consecutive snapshot files starting at `base_time`.
    fn snapshot_mock() -> MockMesonetClient {
        let mut mock = MockMesonetClient::default();
        for i in 0..30 {
            let ts = base_time() + TimeDelta::minutes(5 * i);
            let name = DataRequest::snapshot(ts).filename();
            mock = mock.with_file(name.clone(), name.into_bytes());
        }
        mock
    }

    fn slot(i: i64) -> NaiveDateTime {
        base_time() + TimeDelta::minutes(5 * i)
    }

    #[test]
    fn default_config() {
        assert_eq!(CacheConfig::default().capacity, 20);
        assert_eq!(CacheConfig::new(3).capacity, 3);
    }

    #[test]
    fn cache_creation() {
        let cache = FileCache::new(&CacheConfig::default());
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn repeated_fetch_is_served_from_cache() {
        let mock = MockMesonetClient::default().with_file("20080812nrmn.mts", "series data");
        let client = CachedMesonetClient::new(mock, &CacheConfig::default());

        let first = client.fetch(Some(base_time()), Some(stid("NRMN"))).unwrap();
        let second = client.fetch(Some(base_time()), Some(stid("NRMN"))).unwrap();

        assert_eq!(&*first, b"series data");
        assert_eq!(first, second);
        assert_eq!(client.source().request_count(), 1);
        assert_eq!(client.cache_entry_count(), 1);
    }

    #[test]
    fn key_requires_exact_timestamp_and_station() {
        let mock = MockMesonetClient::default()
            .with_file("20080812nrmn.mts", "nrmn")
            .with_file("20080812acme.mts", "acme")
            .with_file("200808121435.mdf", "snapshot");
        let client = CachedMesonetClient::new(mock, &CacheConfig::default());

        client.fetch(Some(base_time()), Some(stid("NRMN"))).unwrap();
        client.fetch(Some(base_time()), Some(stid("ACME"))).unwrap();
        client.fetch(Some(base_time()), None).unwrap();
        // Same file, different timestamp: still a distinct key.
        let later = base_time() + TimeDelta::seconds(30);
        client.fetch(Some(later), Some(stid("NRMN"))).unwrap();

        assert_eq!(client.source().request_count(), 4);
        assert!(client.is_cached(base_time(), None));
        assert!(client.is_cached(later, Some(stid("nrmn"))));
    }

    #[test]
    fn failed_fetch_is_not_cached() {
        let client = CachedMesonetClient::new(MockMesonetClient::default(), &CacheConfig::default());

        assert!(client.fetch(Some(base_time()), None).is_err());
        assert!(client.fetch(Some(base_time()), None).is_err());

        assert_eq!(client.source().request_count(), 2);
        assert_eq!(client.cache_entry_count(), 0);
    }

    #[test]
    fn overflow_evicts_least_recently_used() {
        let client = CachedMesonetClient::new(snapshot_mock(), &CacheConfig::default());

        for i in 0..20 {
            client.fetch(Some(slot(i)), None).unwrap();
        }
        assert_eq!(client.cache_entry_count(), 20);

        // Touch the oldest entry so the second-oldest becomes the LRU victim.
        client.fetch(Some(slot(0)), None).unwrap();
        assert_eq!(client.source().request_count(), 20);

        client.fetch(Some(slot(20)), None).unwrap();

        assert_eq!(client.cache_entry_count(), 20);
        assert!(client.is_cached(slot(0), None));
        assert!(!client.is_cached(slot(1), None));
        assert!(client.is_cached(slot(20), None));

        // The evicted key goes back to the source.
        client.fetch(Some(slot(1)), None).unwrap();
        assert_eq!(client.source().request_count(), 22);
    }

    #[test]
    fn invalidate_clears_everything() {
        let client = CachedMesonetClient::new(snapshot_mock(), &CacheConfig::new(5));
        for i in 0..5 {
            client.fetch(Some(slot(i)), None).unwrap();
        }
        client.invalidate_cache();
        assert_eq!(client.cache_entry_count(), 0);

        client.fetch(Some(slot(0)), None).unwrap();
        assert_eq!(client.source().request_count(), 6);
    }
}
