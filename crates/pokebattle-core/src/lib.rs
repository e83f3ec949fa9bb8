//! Pokebattle Core - Battle orchestration and scoring
//!
//! This crate holds everything in pokebattle that makes a decision:
//! - Creature, battle and score data types (`model`)
//! - Pairwise attack comparison and rank-derived display scores (`scoring`)
//! - The `Catalog` and `ScoreStore` seams the engine talks through
//! - `BattleEngine`: sample, score, persist and read back one battle
//! - `QueryFacade`: creature listing, battle history and leaderboard
//!
//! Transport, configuration loading and the concrete store live in the
//! `pokebattle-server` and `pokebattle-db` crates.

mod catalog;
mod engine;
mod error;
pub mod model;
mod query;
pub mod scoring;
mod store;

pub use catalog::Catalog;
pub use engine::{BattleConfig, BattleEngine};
pub use error::{Error, Result};
pub use model::{
    BattleRecord, BattleResult, BattleSummary, CreatureDetail, CreatureIndex, DateRange,
    NamedResource, NewBattle, Participant, StatEntry,
};
pub use query::QueryFacade;
pub use store::ScoreStore;

#[cfg(test)]
mod testing;
