//! Read-side operations: creatures, battle history and leaderboard.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::{BattleSummary, CreatureIndex, DateRange, Participant};
use crate::store::ScoreStore;

/// Thin read façade over the catalog and score store.
pub struct QueryFacade<C, S> {
    catalog: C,
    store: S,
}

impl<C: Catalog, S: ScoreStore> QueryFacade<C, S> {
    pub fn new(catalog: C, store: S) -> Self {
        Self { catalog, store }
    }

    /// The catalog's creature index, unchanged.
    pub fn list_creatures(&self) -> Result<CreatureIndex> {
        self.catalog.fetch_index()
    }

    /// Battles with their participants, oldest first.
    ///
    /// Bounds are `YYYY-MM-DD` strings; the filter applies only when both
    /// are non-empty and then keeps battles that started on a day inside
    /// the closed range.
    pub fn list_battles(&self, start_date: &str, end_date: &str) -> Result<Vec<BattleSummary>> {
        let range = DateRange::from_bounds(start_date, end_date)?;

        let mut battles = self.store.query_battles(range.as_ref())?;
        battles.sort_by_key(|b| b.id);

        battles
            .into_iter()
            .map(|battle| {
                let participants = self.store.score_entries_for_battle(battle.id)?;
                Ok(BattleSummary::new(battle, participants))
            })
            .collect()
    }

    /// Total display score per creature across all battles.
    ///
    /// Highest total first; equal totals are ordered by name.
    pub fn leaderboard(&self) -> Result<Vec<Participant>> {
        let mut rows = self.store.leaderboard()?;
        rows.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        Ok(rows)
    }
}
