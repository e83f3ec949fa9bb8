//! Creature, battle and score types shared by the engine, store and transport.
//!
//! Catalog types mirror the PokeAPI JSON shapes so they can be deserialized
//! straight off the wire and passed back out unchanged.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Stat name the battle comparison reads.
pub const ATTACK: &str = "attack";

/// A `{ name, url }` pair as the catalog returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    /// Create a resource with no URL.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: String::new(),
        }
    }
}

/// Full listing of creatures available in the catalog, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureIndex {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

impl CreatureIndex {
    /// Build an index from bare names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let results: Vec<NamedResource> = names.into_iter().map(NamedResource::named).collect();
        Self {
            count: results.len() as u64,
            next: None,
            previous: None,
            results,
        }
    }

    /// Number of entries actually present in `results`.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// One named stat of a creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: i64,
    #[serde(default)]
    pub effort: i64,
    pub stat: NamedResource,
}

/// Attribute detail of a single creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureDetail {
    pub name: String,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
}

impl CreatureDetail {
    /// Create a creature with a single attack stat.
    pub fn with_attack(name: impl Into<String>, attack: i64) -> Self {
        Self {
            name: name.into(),
            stats: vec![StatEntry {
                base_stat: attack,
                effort: 0,
                stat: NamedResource::named(ATTACK),
            }],
        }
    }

    /// Base value of the named stat, if the creature has it.
    pub fn stat(&self, name: &str) -> Option<i64> {
        self.stats
            .iter()
            .find(|s| s.stat.name == name)
            .map(|s| s.base_stat)
    }

    /// Base attack, 0 when the catalog omits it.
    pub fn attack(&self) -> i64 {
        self.stat(ATTACK).unwrap_or(0)
    }
}

/// A `{ name, score }` row: a battle participant or a leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub score: u64,
}

impl Participant {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Battle row before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBattle {
    pub winner: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Persisted battle row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRecord {
    pub id: u64,
    pub winner: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Outcome of triggering a battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub battle_id: u64,
    pub winner: String,
    pub participants: Vec<Participant>,
}

/// A past battle with its participants embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub battle_id: u64,
    pub winner: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub participants: Vec<Participant>,
}

impl BattleSummary {
    pub fn new(record: BattleRecord, participants: Vec<Participant>) -> Self {
        Self {
            battle_id: record.id,
            winner: record.winner,
            start_time: record.start_time,
            end_time: record.end_time,
            participants,
        }
    }
}

/// Closed calendar-day range, compared against UTC start times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Date format accepted by [`DateRange::from_bounds`].
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse optional `YYYY-MM-DD` bounds.
    ///
    /// Returns `Ok(None)` (no filtering) unless both bounds are non-empty.
    pub fn from_bounds(start: &str, end: &str) -> Result<Option<Self>> {
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        }))
    }

    /// Whether the calendar day of `time` falls inside the range.
    pub fn contains(&self, time: &DateTime<Utc>) -> bool {
        let day = time.date_naive();
        self.start <= day && day <= self.end
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DateRange::FORMAT)
        .map_err(|e| Error::InvalidRequest(format!("invalid date '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_attack_defaults_to_zero() {
        let creature = CreatureDetail {
            name: "magikarp".to_string(),
            stats: vec![StatEntry {
                base_stat: 20,
                effort: 0,
                stat: NamedResource::named("hp"),
            }],
        };
        assert_eq!(creature.stat("hp"), Some(20));
        assert_eq!(creature.attack(), 0);
        assert_eq!(CreatureDetail::with_attack("machamp", 130).attack(), 130);
    }

    #[test]
    fn test_index_from_names() {
        let index = CreatureIndex::from_names(["bulbasaur", "ivysaur"]);
        assert_eq!(index.count, 2);
        assert_eq!(index.len(), 2);
        assert_eq!(index.results[1].name, "ivysaur");
        assert!(!index.is_empty());
    }

    #[test]
    fn test_date_range_requires_both_bounds() {
        assert_eq!(DateRange::from_bounds("", "").unwrap(), None);
        assert_eq!(DateRange::from_bounds("2022-10-12", "").unwrap(), None);
        assert_eq!(DateRange::from_bounds("", "2022-10-12").unwrap(), None);

        let range = DateRange::from_bounds("2022-10-12", "2022-10-14")
            .unwrap()
            .unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2022, 10, 12).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2022, 10, 14).unwrap());
    }

    #[test]
    fn test_date_range_rejects_garbage() {
        let err = DateRange::from_bounds("12/10/2022", "2022-10-12").unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn test_date_range_is_inclusive_by_day() {
        let day = NaiveDate::from_ymd_opt(2022, 10, 12).unwrap();
        let range = DateRange::new(day, day);

        let first = Utc.with_ymd_and_hms(2022, 10, 12, 0, 0, 0).unwrap();
        let last = Utc.with_ymd_and_hms(2022, 10, 12, 23, 59, 59).unwrap();
        let before = Utc.with_ymd_and_hms(2022, 10, 11, 23, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2022, 10, 13, 0, 0, 0).unwrap();

        assert!(range.contains(&first));
        assert!(range.contains(&last));
        assert!(!range.contains(&before));
        assert!(!range.contains(&after));
    }
}
