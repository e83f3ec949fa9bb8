//! Database store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use log::debug;
use native_db::transaction::RwTransaction;
use native_db::*;
use pokebattle_core::{BattleRecord, DateRange, NewBattle, Participant, ScoreStore};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredBattle>().unwrap();
    models.define::<StoredScore>().unwrap();
    models.define::<StoredSequence>().unwrap();
    models
});

/// Database store for battles and scores.
pub struct Store {
    pub(crate) db: Database<'static>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let db = Builder::new()
            .create(&MODELS, path)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Save a battle and return its generated id.
    pub fn save_battle(&self, battle: &NewBattle) -> Result<u64> {
        let rw = self.db.rw_transaction()?;
        let id = insert_battle(&rw, battle)?;
        rw.commit()?;
        Ok(id)
    }

    /// Save one score row. The battle must already exist.
    pub fn save_score(&self, battle_id: u64, participant: &Participant) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        if rw.get().primary::<StoredBattle>(battle_id)?.is_none() {
            return Err(Error::InvalidRecord(format!(
                "score for '{}' references unknown battle {}",
                participant.name, battle_id
            )));
        }
        insert_score(&rw, battle_id, participant)?;
        rw.commit()?;
        Ok(())
    }

    /// Save a battle and all of its score rows in one transaction.
    ///
    /// Nothing is written unless every row is accepted.
    pub fn save_battle_with_scores(
        &self,
        battle: &NewBattle,
        participants: &[Participant],
    ) -> Result<u64> {
        let rw = self.db.rw_transaction()?;
        let id = insert_battle(&rw, battle)?;
        for participant in participants {
            insert_score(&rw, id, participant)?;
        }
        rw.commit()?;
        debug!(
            "committed battle {} with {} score rows",
            id,
            participants.len()
        );
        Ok(id)
    }
}

/// Hand out the next id of `sequence` within `rw`.
fn next_id(rw: &RwTransaction<'_>, sequence: &str) -> Result<u64> {
    let current: Option<StoredSequence> = rw.get().primary(sequence.to_string())?;
    let id = current.map_or(1, |s| s.next);
    rw.upsert(StoredSequence {
        id: sequence.to_string(),
        next: id + 1,
    })?;
    Ok(id)
}

fn insert_battle(rw: &RwTransaction<'_>, battle: &NewBattle) -> Result<u64> {
    if battle.winner.is_empty() {
        return Err(Error::InvalidRecord("battle winner is empty".to_string()));
    }
    if battle.end_time < battle.start_time {
        return Err(Error::InvalidRecord(
            "battle ends before it starts".to_string(),
        ));
    }
    let id = next_id(rw, BATTLE_SEQUENCE)?;
    rw.insert(StoredBattle::from_new(id, battle))?;
    Ok(id)
}

fn insert_score(rw: &RwTransaction<'_>, battle_id: u64, participant: &Participant) -> Result<()> {
    if participant.name.is_empty() {
        return Err(Error::InvalidRecord(format!(
            "score row for battle {} has no name",
            battle_id
        )));
    }
    let id = next_id(rw, SCORE_SEQUENCE)?;
    rw.insert(StoredScore::from_participant(id, battle_id, participant))?;
    Ok(())
}

impl ScoreStore for Store {
    fn insert_battle(&self, battle: &NewBattle) -> pokebattle_core::Result<u64> {
        Ok(self.save_battle(battle)?)
    }

    fn insert_score_entry(
        &self,
        battle_id: u64,
        entry: &Participant,
    ) -> pokebattle_core::Result<()> {
        Ok(self.save_score(battle_id, entry)?)
    }

    fn record_battle(
        &self,
        battle: &NewBattle,
        entries: &[Participant],
    ) -> pokebattle_core::Result<u64> {
        Ok(self.save_battle_with_scores(battle, entries)?)
    }

    fn query_battles(&self, range: Option<&DateRange>) -> pokebattle_core::Result<Vec<BattleRecord>> {
        Ok(self.battles_in_range(range)?)
    }

    fn score_entries_for_battle(&self, battle_id: u64) -> pokebattle_core::Result<Vec<Participant>> {
        Ok(self.scores_for_battle(battle_id)?)
    }

    fn leaderboard(&self) -> pokebattle_core::Result<Vec<Participant>> {
        Ok(self.score_totals()?)
    }
}
