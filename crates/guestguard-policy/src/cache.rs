//! Short-lived connect-params cache.
//!
//! `extension -> (params, fetched_at)`. Entries are replaced wholesale on a
//! successful fetch and never deleted; staleness is judged lazily on read. A
//! stale entry is treated exactly like an absent one.

use dashmap::DashMap;
use tokio::time::{Duration, Instant};

use guestguard_core::protocol::params::ConnectParams;

/// Age at which an entry stops being served.
pub const CACHE_EXPIRY: Duration = Duration::from_millis(60_000);

#[derive(Debug, Clone, Copy)]
pub struct CacheEntry {
    params: ConnectParams,
    fetched_at: Instant,
}

impl CacheEntry {
    pub fn params(&self) -> ConnectParams {
        self.params
    }
    pub fn fetched_at(&self) -> Instant {
        self.fetched_at
    }
}

/// Result of a cache read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Hit(ConnectParams),
    Stale,
    Miss,
}

impl Lookup {
    pub fn label(&self) -> &'static str {
        match self {
            Lookup::Hit(_) => "hit",
            Lookup::Stale => "stale",
            Lookup::Miss => "miss",
        }
    }
}

#[derive(Debug, Default)]
pub struct ParamsCache {
    entries: DashMap<String, CacheEntry>,
}

impl ParamsCache {
    pub fn new() -> Self {
        Self { entries: DashMap::new() }
    }

    pub fn is_stale(entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.fetched_at) >= CACHE_EXPIRY
    }

    pub fn lookup(&self, extension: &str) -> Lookup {
        // copy out; never hold the shard guard past this call
        let Some(entry) = self.entry(extension) else {
            return Lookup::Miss;
        };
        if Self::is_stale(&entry, Instant::now()) {
            Lookup::Stale
        } else {
            Lookup::Hit(entry.params)
        }
    }

    pub fn get_fresh(&self, extension: &str) -> Option<ConnectParams> {
        match self.lookup(extension) {
            Lookup::Hit(p) => Some(p),
            _ => None,
        }
    }

    /// Store freshly fetched params, superseding any previous entry.
    ///
    /// Only the service writes; hosts get a read-only view.
    ///
    /// ```compile_fail
    /// let cache = guestguard_policy::ParamsCache::new();
    /// cache.put("100", guestguard_core::ConnectParams::admin());
    /// ```
    pub(crate) fn put(&self, extension: &str, params: ConnectParams) {
        self.entries.insert(
            extension.to_string(),
            CacheEntry { params, fetched_at: Instant::now() },
        );
    }

    pub fn entry(&self, extension: &str) -> Option<CacheEntry> {
        self.entries.get(extension).map(|r| *r.value())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fresh_until_expiry() {
        let cache = ParamsCache::new();
        cache.put("100", ConnectParams::guest(false, false));

        tokio::time::advance(CACHE_EXPIRY - Duration::from_millis(1)).await;
        assert_eq!(cache.lookup("100"), Lookup::Hit(ConnectParams::guest(false, false)));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(cache.lookup("100"), Lookup::Stale);
        // stale entries stay in the map
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn put_supersedes_and_restarts_age() {
        let cache = ParamsCache::new();
        cache.put("100", ConnectParams::admin());
        tokio::time::advance(CACHE_EXPIRY).await;
        assert!(cache.get_fresh("100").is_none());

        cache.put("100", ConnectParams::guest(true, true));
        assert_eq!(cache.get_fresh("100"), Some(ConnectParams::guest(true, true)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn unknown_is_miss() {
        let cache = ParamsCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.lookup("nope").label(), "miss");
    }
}
