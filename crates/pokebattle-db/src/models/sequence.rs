//! Id sequences.

use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// Sequence name for battle ids.
pub const BATTLE_SEQUENCE: &str = "battle";
/// Sequence name for score row ids.
pub const SCORE_SEQUENCE: &str = "score";

/// Next id to hand out for a named sequence. One row per sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 3, version = 1)]
#[native_db]
pub struct StoredSequence {
    /// Sequence name.
    #[primary_key]
    pub id: String,
    /// Next unused id.
    pub next: u64,
}
