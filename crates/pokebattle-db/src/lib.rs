//! Pokebattle DB - Battle and score storage using native_db
//!
//! Provides persistent storage for:
//! - Battle rows (winner, start and end time) with generated ids
//! - Per-participant score rows, indexed by battle
//! - Id sequences, advanced inside the same transaction as the rows
//!
//! [`Store`] implements [`pokebattle_core::ScoreStore`]; a battle and its
//! scores are committed in a single read-write transaction.

mod error;
mod models;
mod queries;
mod store;

pub use error::{Error, Result};
pub use store::Store;
