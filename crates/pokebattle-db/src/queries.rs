//! Read queries for battles, scores and the leaderboard.

use crate::error::{Error, Result};
use crate::models::*;
use crate::store::Store;
use pokebattle_core::{BattleRecord, DateRange, Participant};
use std::collections::BTreeMap;

impl Store {
    /// Battles in ascending id order, optionally limited to a day range.
    pub fn battles_in_range(&self, range: Option<&DateRange>) -> Result<Vec<BattleRecord>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredBattle>()?;
        let iter = scan.all()?;
        let battles: std::result::Result<Vec<StoredBattle>, _> = iter.collect();
        let battles = battles.map_err(|e| Error::Database(e.to_string()))?;
        Ok(battles
            .iter()
            .filter(|b| range.map_or(true, |r| r.contains(&b.start_time)))
            .map(|b| b.to_record())
            .collect())
    }

    /// Score rows of one battle, in the order they were written.
    pub fn scores_for_battle(&self, battle_id: u64) -> Result<Vec<Participant>> {
        let r = self.db.r_transaction()?;
        let scan = r
            .scan()
            .secondary::<StoredScore>(StoredScoreKey::battle_id)?;
        let iter = scan.start_with(battle_id)?;
        let scores: std::result::Result<Vec<StoredScore>, _> = iter.collect();
        let mut scores = scores.map_err(|e| Error::Database(e.to_string()))?;
        scores.sort_by_key(|s| s.id);
        Ok(scores.iter().map(|s| s.to_participant()).collect())
    }

    /// Sum of scores per name, highest first, ties by name.
    pub fn score_totals(&self) -> Result<Vec<Participant>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredScore>()?;
        let iter = scan.all()?;
        let scores: std::result::Result<Vec<StoredScore>, _> = iter.collect();
        let scores = scores.map_err(|e| Error::Database(e.to_string()))?;

        let mut totals: BTreeMap<String, u64> = BTreeMap::new();
        for score in scores {
            *totals.entry(score.name).or_insert(0) += score.score;
        }

        let mut rows: Vec<Participant> = totals
            .into_iter()
            .map(|(name, score)| Participant { name, score })
            .collect();
        // Stable sort keeps the BTreeMap's name order among equal totals.
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(rows)
    }
}
