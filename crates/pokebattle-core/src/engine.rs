//! Battle engine: sample creatures, score them, persist the outcome.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::model::{BattleResult, CreatureDetail, CreatureIndex, NewBattle, Participant};
use crate::scoring;
use crate::store::ScoreStore;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Sampling parameters for battles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// Draws per battle when the caller does not ask for a size.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    /// Highest index position a draw can land on (inclusive).
    #[serde(default = "default_draw_ceiling")]
    pub draw_ceiling: usize,
    /// Largest sample size a caller may request.
    #[serde(default = "default_max_sample_size")]
    pub max_sample_size: usize,
}

fn default_sample_size() -> usize {
    5
}

fn default_draw_ceiling() -> usize {
    15
}

fn default_max_sample_size() -> usize {
    64
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            draw_ceiling: default_draw_ceiling(),
            max_sample_size: default_max_sample_size(),
        }
    }
}

impl BattleConfig {
    /// Reject a requested sample size outside `1..=max_sample_size`.
    pub fn check_sample_size(&self, sample_size: usize) -> Result<()> {
        if sample_size == 0 || sample_size > self.max_sample_size {
            return Err(Error::InvalidRequest(format!(
                "sample size must be between 1 and {}, got {}",
                self.max_sample_size, sample_size
            )));
        }
        Ok(())
    }

    /// Check the configuration's own default against its limit.
    pub fn validate(&self) -> Result<()> {
        self.check_sample_size(self.sample_size)
    }
}

/// Runs battles against a catalog and records them in a store.
///
/// The engine holds no per-battle state; concurrent calls share nothing but
/// the catalog and store handles.
pub struct BattleEngine<C, S> {
    catalog: C,
    store: S,
    config: BattleConfig,
}

impl<C: Catalog, S: ScoreStore> BattleEngine<C, S> {
    pub fn new(catalog: C, store: S, config: BattleConfig) -> Self {
        Self {
            catalog,
            store,
            config,
        }
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Trigger a battle of `sample_size` draws using a thread-local RNG.
    pub fn trigger_battle(&self, sample_size: usize) -> Result<BattleResult> {
        self.trigger_battle_with(&mut rand::thread_rng(), sample_size, Utc::now())
    }

    /// Trigger a battle with a caller-supplied RNG and start time.
    pub fn trigger_battle_with<R: Rng>(
        &self,
        rng: &mut R,
        sample_size: usize,
        started_at: DateTime<Utc>,
    ) -> Result<BattleResult> {
        self.config.check_sample_size(sample_size)?;
        let draws: Vec<usize> = (0..sample_size)
            .map(|_| rng.gen_range(0..=self.config.draw_ceiling))
            .collect();
        self.resolve(&draws, started_at)
    }

    /// Run a battle over already drawn index positions.
    fn resolve(&self, draws: &[usize], started_at: DateTime<Utc>) -> Result<BattleResult> {
        let index = self.catalog.fetch_index()?;
        let sample = self.fetch_sample(&index, draws)?;

        let ranking = scoring::rank(scoring::accumulate(&sample));
        let winner = ranking.first().ok_or(Error::EmptySample)?;
        debug!(
            "battle ranking: {}",
            ranking
                .iter()
                .map(|r| format!("{}={}", r.name, r.accumulated))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let battle = NewBattle {
            winner: winner.name.clone(),
            start_time: started_at,
            end_time: started_at + Duration::minutes(winner.accumulated as i64),
        };
        let entries: Vec<Participant> = ranking
            .iter()
            .map(|r| Participant::new(r.name.clone(), r.display))
            .collect();

        let battle_id = self.store.record_battle(&battle, &entries)?;
        info!(
            "battle {} won by {} ({} participants)",
            battle_id,
            battle.winner,
            entries.len()
        );

        let participants = self.store.score_entries_for_battle(battle_id)?;
        Ok(BattleResult {
            battle_id,
            winner: battle.winner,
            participants,
        })
    }

    /// Fetch details for every draw that lands inside the index.
    fn fetch_sample(&self, index: &CreatureIndex, draws: &[usize]) -> Result<Vec<CreatureDetail>> {
        let mut sample = Vec::with_capacity(draws.len());
        for &draw in draws {
            match index.results.get(draw) {
                Some(entry) => sample.push(self.catalog.fetch_detail(&entry.name)?),
                None => debug!(
                    "draw {} outside catalog index of {} entries, skipped",
                    draw,
                    index.len()
                ),
            }
        }
        Ok(sample)
    }
}
