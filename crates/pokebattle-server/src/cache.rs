//! In-memory catalog cache using moka

use crate::config::CacheConfig;
use log::debug;
use moka::sync::Cache;
use pokebattle_core::{Catalog, CreatureDetail, CreatureIndex, Result};
use std::time::Duration;

/// Catalog wrapper that keeps the index and creature details for a TTL.
///
/// Only successful fetches are cached.
pub struct CachedCatalog<C> {
    inner: C,
    index: Cache<(), CreatureIndex>,
    details: Cache<String, CreatureDetail>,
}

impl<C: Catalog> CachedCatalog<C> {
    /// Wrap a catalog
    pub fn new(inner: C, config: &CacheConfig) -> Self {
        let ttl = Duration::from_secs(config.ttl_secs);
        let index = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        let details = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(ttl)
            .build();

        Self {
            inner,
            index,
            details,
        }
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.index.invalidate_all();
        self.details.invalidate_all();
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            index_cached: self.index.contains_key(&()),
            detail_entries: self.details.entry_count(),
        }
    }
}

impl<C: Catalog> Catalog for CachedCatalog<C> {
    fn fetch_index(&self) -> Result<CreatureIndex> {
        if let Some(index) = self.index.get(&()) {
            return Ok(index);
        }
        let index = self.inner.fetch_index()?;
        debug!("cached catalog index of {} entries", index.len());
        self.index.insert((), index.clone());
        Ok(index)
    }

    fn fetch_detail(&self, name: &str) -> Result<CreatureDetail> {
        if let Some(detail) = self.details.get(name) {
            return Ok(detail);
        }
        let detail = self.inner.fetch_detail(name)?;
        self.details.insert(name.to_string(), detail.clone());
        Ok(detail)
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub index_cached: bool,
    pub detail_entries: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticCatalog;
    use pokebattle_core::Error;

    fn config() -> CacheConfig {
        CacheConfig {
            max_entries: 100,
            ttl_secs: 60,
        }
    }

    #[test]
    fn test_index_fetched_once() {
        let cached = CachedCatalog::new(StaticCatalog::with_attacks(&[("abra", 20)]), &config());

        let first = cached.fetch_index().unwrap();
        let second = cached.fetch_index().unwrap();
        assert_eq!(first, second);
        assert_eq!(cached.inner.index_calls(), 1);
        assert!(cached.stats().index_cached);
    }

    #[test]
    fn test_details_fetched_once_per_name() {
        let cached = CachedCatalog::new(
            StaticCatalog::with_attacks(&[("abra", 20), ("kadabra", 35)]),
            &config(),
        );

        assert_eq!(cached.fetch_detail("abra").unwrap().attack(), 20);
        assert_eq!(cached.fetch_detail("abra").unwrap().attack(), 20);
        assert_eq!(cached.fetch_detail("kadabra").unwrap().attack(), 35);
        assert_eq!(cached.inner.detail_calls(), 2);
    }

    #[test]
    fn test_errors_not_cached() {
        let cached = CachedCatalog::new(StaticCatalog::with_attacks(&[("abra", 20)]), &config());

        assert!(matches!(
            cached.fetch_detail("missingno"),
            Err(Error::NotFound(_))
        ));
        assert!(cached.fetch_detail("missingno").is_err());
        assert_eq!(cached.inner.detail_calls(), 2);
    }

    #[test]
    fn test_clear() {
        let cached = CachedCatalog::new(StaticCatalog::with_attacks(&[("abra", 20)]), &config());

        cached.fetch_index().unwrap();
        cached.clear();
        cached.fetch_index().unwrap();
        assert_eq!(cached.inner.index_calls(), 2);
    }
}
