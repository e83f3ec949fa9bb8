//! Catalog double shared by the server tests.

use pokebattle_core::{Catalog, CreatureDetail, CreatureIndex, Error, Result};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Catalog answering from a fixed list of creatures.
#[derive(Default)]
pub struct StaticCatalog {
    creatures: Vec<CreatureDetail>,
    offline: AtomicBool,
    index_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl StaticCatalog {
    pub fn with_attacks(creatures: &[(&str, i64)]) -> Self {
        Self {
            creatures: creatures
                .iter()
                .map(|(name, attack)| CreatureDetail::with_attack(*name, *attack))
                .collect(),
            ..Default::default()
        }
    }

    /// Sixteen creatures so that every draw in the default range hits.
    pub fn full() -> Self {
        let names: Vec<(String, i64)> = (0..16)
            .map(|i| (format!("mon{:02}", i), 5 * i as i64))
            .collect();
        let refs: Vec<(&str, i64)> = names.iter().map(|(n, a)| (n.as_str(), *a)).collect();
        Self::with_attacks(&refs)
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    pub fn index_calls(&self) -> usize {
        self.index_calls.load(Ordering::Relaxed)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::Relaxed)
    }
}

impl Catalog for StaticCatalog {
    fn fetch_index(&self) -> Result<CreatureIndex> {
        self.index_calls.fetch_add(1, Ordering::Relaxed);
        if self.offline.load(Ordering::Relaxed) {
            return Err(Error::Upstream("catalog offline".to_string()));
        }
        Ok(CreatureIndex::from_names(
            self.creatures.iter().map(|c| c.name.clone()),
        ))
    }

    fn fetch_detail(&self, name: &str) -> Result<CreatureDetail> {
        self.detail_calls.fetch_add(1, Ordering::Relaxed);
        self.creatures
            .iter()
            .find(|c| c.name == name)
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }
}
