//! Battle and score models for database storage.

use chrono::{DateTime, Utc};
use native_db::*;
use native_model::{native_model, Model};
use pokebattle_core::{BattleRecord, NewBattle, Participant};
use serde::{Deserialize, Serialize};

/// Stored battle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredBattle {
    /// Primary key - generated battle id.
    #[primary_key]
    pub id: u64,
    /// Winning creature name.
    pub winner: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl StoredBattle {
    pub fn from_new(id: u64, battle: &NewBattle) -> Self {
        Self {
            id,
            winner: battle.winner.clone(),
            start_time: battle.start_time,
            end_time: battle.end_time,
        }
    }

    pub fn to_record(&self) -> BattleRecord {
        BattleRecord {
            id: self.id,
            winner: self.winner.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// Stored score row: one participant of one battle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredScore {
    /// Primary key - generated row id, increasing in insertion order.
    #[primary_key]
    pub id: u64,
    /// Battle this row belongs to.
    #[secondary_key]
    pub battle_id: u64,
    /// Creature name.
    pub name: String,
    /// Display score.
    pub score: u64,
}

impl StoredScore {
    pub fn from_participant(id: u64, battle_id: u64, participant: &Participant) -> Self {
        Self {
            id,
            battle_id,
            name: participant.name.clone(),
            score: participant.score,
        }
    }

    pub fn to_participant(&self) -> Participant {
        Participant::new(self.name.clone(), self.score)
    }
}
