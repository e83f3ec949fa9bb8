//! In-memory catalog and store used by the unit tests.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::model::{BattleRecord, CreatureDetail, CreatureIndex, DateRange, NewBattle, Participant};
use crate::store::ScoreStore;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Catalog serving a fixed set of creatures.
#[derive(Default)]
pub struct FakeCatalog {
    pub index: CreatureIndex,
    pub details: HashMap<String, CreatureDetail>,
    pub fail_index: bool,
    pub detail_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new(creatures: Vec<CreatureDetail>) -> Self {
        let index = CreatureIndex::from_names(creatures.iter().map(|c| c.name.clone()));
        let details = creatures.into_iter().map(|c| (c.name.clone(), c)).collect();
        Self {
            index,
            details,
            ..Default::default()
        }
    }

    /// Catalog whose index lists `count` creatures with attack `10 * i`.
    pub fn numbered(count: usize) -> Self {
        Self::new(
            (0..count)
                .map(|i| CreatureDetail::with_attack(format!("mon{:02}", i), 10 * i as i64))
                .collect(),
        )
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::Relaxed)
    }
}

impl Catalog for FakeCatalog {
    fn fetch_index(&self) -> Result<CreatureIndex> {
        if self.fail_index {
            return Err(Error::Upstream("index unavailable".to_string()));
        }
        Ok(self.index.clone())
    }

    fn fetch_detail(&self, name: &str) -> Result<CreatureDetail> {
        self.detail_calls.fetch_add(1, Ordering::Relaxed);
        self.details
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }
}

#[derive(Default)]
struct Tables {
    battles: Vec<BattleRecord>,
    scores: Vec<(u64, Participant)>,
}

/// Store keeping rows in vectors, with switchable write failures.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    pub fail_battle_insert: bool,
    /// Fail the score insert once this many score rows have been written.
    pub fail_scores_after: Option<usize>,
}

impl MemoryStore {
    /// Store whose battle inserts always fail.
    pub fn failing_battles() -> Self {
        Self {
            fail_battle_insert: true,
            ..Default::default()
        }
    }

    /// Store that fails once `rows` score rows have been written.
    pub fn failing_scores_after(rows: usize) -> Self {
        Self {
            fail_scores_after: Some(rows),
            ..Default::default()
        }
    }

    pub fn battles(&self) -> Vec<BattleRecord> {
        self.tables.lock().unwrap().battles.clone()
    }

    pub fn score_rows(&self) -> usize {
        self.tables.lock().unwrap().scores.len()
    }
}

impl ScoreStore for MemoryStore {
    fn insert_battle(&self, battle: &NewBattle) -> Result<u64> {
        if self.fail_battle_insert {
            return Err(Error::Persistence("battle table is read-only".to_string()));
        }
        let mut tables = self.tables.lock().unwrap();
        let id = tables.battles.len() as u64 + 1;
        tables.battles.push(BattleRecord {
            id,
            winner: battle.winner.clone(),
            start_time: battle.start_time,
            end_time: battle.end_time,
        });
        Ok(id)
    }

    fn insert_score_entry(&self, battle_id: u64, entry: &Participant) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        if self.fail_scores_after == Some(tables.scores.len()) {
            return Err(Error::Persistence("score table is full".to_string()));
        }
        tables.scores.push((battle_id, entry.clone()));
        Ok(())
    }

    fn query_battles(&self, range: Option<&DateRange>) -> Result<Vec<BattleRecord>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .battles
            .iter()
            .filter(|b| range.map_or(true, |r| r.contains(&b.start_time)))
            .cloned()
            .collect())
    }

    fn score_entries_for_battle(&self, battle_id: u64) -> Result<Vec<Participant>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .scores
            .iter()
            .filter(|(id, _)| *id == battle_id)
            .map(|(_, p)| p.clone())
            .collect())
    }

    fn leaderboard(&self) -> Result<Vec<Participant>> {
        let tables = self.tables.lock().unwrap();
        let mut totals: BTreeMap<String, u64> = BTreeMap::new();
        for (_, p) in &tables.scores {
            *totals.entry(p.name.clone()).or_insert(0) += p.score;
        }
        let mut rows: Vec<Participant> = totals
            .into_iter()
            .map(|(name, score)| Participant { name, score })
            .collect();
        // Same order as the native_db store: total descending, then name.
        rows.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        Ok(rows)
    }
}
