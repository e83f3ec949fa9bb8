//! Round-robin attack comparison and ranking
//!
//! Every ordered pair of the sample is compared, self-pairs included: the
//! higher attack takes [`WIN_POINTS`], equal attacks give both sides
//! [`DRAW_POINTS`]. Scores accumulate per name, so a creature drawn twice
//! fights as one merged entry.
//!
//! Ranking orders by accumulated score descending and breaks ties by name
//! ascending. The persisted display score is `n - 1 - rank`.

use crate::model::CreatureDetail;
use indexmap::IndexMap;

/// Points for the stronger side of a pair.
pub const WIN_POINTS: u64 = 3;
/// Points for each side of a tied pair.
pub const DRAW_POINTS: u64 = 1;

/// Accumulated comparison points keyed by creature name, in first-seen order.
pub type Scoreboard = IndexMap<String, u64>;

/// Run the full cross-product comparison over `sample`.
pub fn accumulate(sample: &[CreatureDetail]) -> Scoreboard {
    let mut scores = Scoreboard::with_capacity(sample.len());

    for a in sample {
        for b in sample {
            let (att_a, att_b) = (a.attack(), b.attack());
            if att_a > att_b {
                *scores.entry(a.name.clone()).or_insert(0) += WIN_POINTS;
            } else if att_b > att_a {
                *scores.entry(b.name.clone()).or_insert(0) += WIN_POINTS;
            } else {
                *scores.entry(a.name.clone()).or_insert(0) += DRAW_POINTS;
                *scores.entry(b.name.clone()).or_insert(0) += DRAW_POINTS;
            }
        }
    }

    scores
}

/// A participant's position after ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked {
    pub name: String,
    /// Raw comparison points, used to pick the winner.
    pub accumulated: u64,
    /// Rank-derived score that gets persisted.
    pub display: u64,
}

/// Order a scoreboard into ranks and assign display scores.
///
/// The first element, if any, is the winner.
pub fn rank(scores: Scoreboard) -> Vec<Ranked> {
    let mut entries: Vec<(String, u64)> = scores.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let count = entries.len() as u64;
    entries
        .into_iter()
        .enumerate()
        .map(|(rank, (name, accumulated))| Ranked {
            name,
            accumulated,
            display: count - 1 - rank as u64,
        })
        .collect()
}
