//! Score store seam.

use crate::error::Result;
use crate::model::{BattleRecord, DateRange, NewBattle, Participant};
use std::sync::Arc;

/// Persistence for battles and their per-participant scores.
pub trait ScoreStore: Send + Sync {
    /// Insert a battle row and return its generated id.
    fn insert_battle(&self, battle: &NewBattle) -> Result<u64>;

    /// Insert one score row for an existing battle.
    fn insert_score_entry(&self, battle_id: u64, entry: &Participant) -> Result<()>;

    /// Insert a battle together with all of its score rows.
    ///
    /// The default runs the single-row inserts one after another and can
    /// leave a battle without some of its scores if an insert fails midway.
    /// Stores with transactions override this so that either everything or
    /// nothing is written.
    fn record_battle(&self, battle: &NewBattle, entries: &[Participant]) -> Result<u64> {
        let battle_id = self.insert_battle(battle)?;
        for entry in entries {
            self.insert_score_entry(battle_id, entry)?;
        }
        Ok(battle_id)
    }

    /// Battles in ascending id order, optionally limited to a day range.
    fn query_battles(&self, range: Option<&DateRange>) -> Result<Vec<BattleRecord>>;

    /// Score rows recorded for one battle.
    fn score_entries_for_battle(&self, battle_id: u64) -> Result<Vec<Participant>>;

    /// Total score per name, highest first, ties by name.
    fn leaderboard(&self) -> Result<Vec<Participant>>;
}

impl<T: ScoreStore + ?Sized> ScoreStore for Arc<T> {
    fn insert_battle(&self, battle: &NewBattle) -> Result<u64> {
        (**self).insert_battle(battle)
    }

    fn insert_score_entry(&self, battle_id: u64, entry: &Participant) -> Result<()> {
        (**self).insert_score_entry(battle_id, entry)
    }

    fn record_battle(&self, battle: &NewBattle, entries: &[Participant]) -> Result<u64> {
        (**self).record_battle(battle, entries)
    }

    fn query_battles(&self, range: Option<&DateRange>) -> Result<Vec<BattleRecord>> {
        (**self).query_battles(range)
    }

    fn score_entries_for_battle(&self, battle_id: u64) -> Result<Vec<Participant>> {
        (**self).score_entries_for_battle(battle_id)
    }

    fn leaderboard(&self) -> Result<Vec<Participant>> {
        (**self).leaderboard()
    }
}
