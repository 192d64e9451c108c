use crate::models::TeamId;
use chrono::NaiveDate;
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Supplies `P(team beats opponent)` as of a reference date.
///
/// Rating models live outside this crate; the simulator only needs a value
/// for every ordered pair of competing teams. `None` means the source cannot
/// price the pair.
pub trait ProbabilitySource {
    fn win_probability(&self, team: &TeamId, opponent: &TeamId, as_of: NaiveDate) -> Option<f64>;
}

impl<F> ProbabilitySource for F
where
    F: Fn(&TeamId, &TeamId, NaiveDate) -> Option<f64>,
{
    fn win_probability(&self, team: &TeamId, opponent: &TeamId, as_of: NaiveDate) -> Option<f64> {
        self(team, opponent, as_of)
    }
}

/// One row of a precomputed probability table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityEntry {
    pub team_a: TeamId,
    pub team_b: TeamId,
    /// Probability that `team_a` beats `team_b`.
    pub prob: f64,
}

/// Fixed lookup table; ignores the reference date.
#[derive(Debug, Clone, Default)]
pub struct TableSource {
    entries: FxHashMap<TeamId, FxHashMap<TeamId, f64>>,
}

impl TableSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, team: impl Into<TeamId>, opponent: impl Into<TeamId>, prob: f64) {
        self.entries.entry(team.into()).or_default().insert(opponent.into(), prob);
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<ProbabilityEntry> for TableSource {
    fn from_iter<I: IntoIterator<Item = ProbabilityEntry>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(entry.team_a, entry.team_b, entry.prob);
        }
        table
    }
}

impl ProbabilitySource for TableSource {
    fn win_probability(&self, team: &TeamId, opponent: &TeamId, _as_of: NaiveDate) -> Option<f64> {
        self.entries.get(team)?.get(opponent).copied()
    }
}
