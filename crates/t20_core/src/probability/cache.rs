//! Ordered-pair probability cache and its dense per-run matrix form.

use super::source::{ProbabilityEntry, ProbabilitySource};
use crate::error::{Result, SimError};
use crate::models::{Roster, TeamId, TeamIdx};
use chrono::NaiveDate;
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Options applied while building a cache from a [`ProbabilitySource`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheOptions {
    /// Clamp every stored value into `[low, high]`.
    #[serde(default)]
    pub clamp: Option<(f64, f64)>,
}

impl CacheOptions {
    /// Bounds the upstream rating service clamps its blended output to.
    pub const SERVICE_CLAMP: (f64, f64) = (0.05, 0.95);

    pub fn validate(&self) -> Result<()> {
        if let Some((low, high)) = self.clamp {
            if !(0.0..=1.0).contains(&low) || !(0.0..=1.0).contains(&high) || low > high {
                return Err(SimError::InvalidConfig(format!(
                    "clamp bounds must satisfy 0 <= low <= high <= 1, got ({low}, {high})"
                )));
            }
        }
        Ok(())
    }
}

/// `P(team beats opponent)` for ordered pairs of teams.
///
/// The two directions of a pair are stored independently and are never
/// derived from each other.
#[derive(Debug, Clone, Default)]
pub struct ProbabilityCache {
    entries: FxHashMap<TeamId, FxHashMap<TeamId, f64>>,
}

impl ProbabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query `source` once per ordered pair of roster teams.
    pub fn build<S>(
        roster: &Roster,
        as_of: NaiveDate,
        source: &S,
        options: &CacheOptions,
    ) -> Result<Self>
    where
        S: ProbabilitySource + ?Sized,
    {
        options.validate()?;

        let mut cache = Self::new();
        let mut clamped = 0usize;

        for (team, opponent) in roster.ordered_pairs() {
            let prob = source.win_probability(team, opponent, as_of).ok_or_else(|| {
                SimError::IncompleteCoverage {
                    team: team.to_string(),
                    opponent: opponent.to_string(),
                }
            })?;
            check_probability(team, opponent, prob)?;

            let stored = match options.clamp {
                Some((low, high)) => {
                    let v = prob.clamp(low, high);
                    if v != prob {
                        clamped += 1;
                    }
                    v
                }
                None => prob,
            };
            cache.insert(team.clone(), opponent.clone(), stored);
        }

        let (min, max) = cache.range().unwrap_or((f64::NAN, f64::NAN));
        if clamped > 0 {
            warn!(clamped, "probabilities clamped into service range");
        }
        debug!(pairs = cache.len(), clamped, min, max, %as_of, "probability cache built");

        Ok(cache)
    }

    pub fn insert(&mut self, team: impl Into<TeamId>, opponent: impl Into<TeamId>, prob: f64) {
        self.entries.entry(team.into()).or_default().insert(opponent.into(), prob);
    }

    pub fn get(&self, team: &str, opponent: &str) -> Option<f64> {
        self.entries.get(team)?.get(opponent).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest and largest stored probability.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.entries.values().flat_map(|m| m.values().copied()).fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        })
    }

    /// All entries sorted by `(team_a, team_b)`.
    pub fn entries(&self) -> Vec<ProbabilityEntry> {
        let mut out: Vec<ProbabilityEntry> = self
            .entries
            .iter()
            .flat_map(|(team, row)| {
                row.iter().map(move |(opponent, &prob)| ProbabilityEntry {
                    team_a: team.clone(),
                    team_b: opponent.clone(),
                    prob,
                })
            })
            .collect();
        out.sort_by(|a, b| (&a.team_a, &a.team_b).cmp(&(&b.team_a, &b.team_b)));
        out
    }

    /// Dense lookup table for the trial loop.
    ///
    /// Fails with `IncompleteCoverage` on the first missing ordered pair and
    /// with `InvalidProbability` on a value outside `[0, 1]`.
    pub fn compile(&self, roster: &Roster) -> Result<ProbabilityMatrix> {
        let n = roster.len();
        let mut values = vec![f64::NAN; n * n];

        for a in 0..n {
            for b in 0..n {
                if a == b {
                    continue;
                }
                let (team, opponent) = (roster.team(a), roster.team(b));
                let prob = self.get(team.as_str(), opponent.as_str()).ok_or_else(|| {
                    SimError::IncompleteCoverage {
                        team: team.to_string(),
                        opponent: opponent.to_string(),
                    }
                })?;
                check_probability(team, opponent, prob)?;
                values[a * n + b] = prob;
            }
        }

        Ok(ProbabilityMatrix { n, values })
    }
}

impl FromIterator<ProbabilityEntry> for ProbabilityCache {
    fn from_iter<I: IntoIterator<Item = ProbabilityEntry>>(iter: I) -> Self {
        let mut cache = Self::new();
        for entry in iter {
            cache.insert(entry.team_a, entry.team_b, entry.prob);
        }
        cache
    }
}

fn check_probability(team: &TeamId, opponent: &TeamId, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimError::InvalidProbability {
            team: team.to_string(),
            opponent: opponent.to_string(),
            value,
        })
    }
}

/// Row-major `n x n` matrix of win probabilities indexed by [`TeamIdx`].
///
/// Every off-diagonal cell is a validated probability; the diagonal is never
/// read.
#[derive(Debug, Clone)]
pub struct ProbabilityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl ProbabilityMatrix {
    #[inline]
    pub fn get(&self, team: TeamIdx, opponent: TeamIdx) -> f64 {
        self.values[team * self.n + opponent]
    }

    pub fn team_count(&self) -> usize {
        self.n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probability::TableSource;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 7).unwrap()
    }

    fn roster() -> Roster {
        Roster::new(["India", "Nepal", "USA"].map(TeamId::from))
    }

    #[test]
    fn test_build_calls_source_once_per_ordered_pair() {
        use std::cell::RefCell;

        let calls = RefCell::new(Vec::new());
        let source = |team: &TeamId, opponent: &TeamId, _: NaiveDate| {
            calls.borrow_mut().push((team.to_string(), opponent.to_string()));
            Some(0.5)
        };

        let cache =
            ProbabilityCache::build(&roster(), as_of(), &source, &CacheOptions::default()).unwrap();

        let mut calls = calls.into_inner();
        let total = calls.len();
        calls.sort();
        calls.dedup();
        assert_eq!(total, 6);
        assert_eq!(calls.len(), 6);
        assert_eq!(cache.len(), 6);
    }

    #[test]
    fn test_build_missing_pair_is_incomplete_coverage() {
        let mut table = TableSource::new();
        table.insert("India", "Nepal", 0.9);

        let err = ProbabilityCache::build(&roster(), as_of(), &table, &CacheOptions::default())
            .unwrap_err();
        assert!(matches!(err, SimError::IncompleteCoverage { .. }));
    }

    #[test]
    fn test_build_rejects_out_of_range_value() {
        let source = |_: &TeamId, _: &TeamId, _: NaiveDate| Some(1.2);
        let err = ProbabilityCache::build(&roster(), as_of(), &source, &CacheOptions::default())
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidProbability { value, .. } if value == 1.2));
    }

    #[test]
    fn test_build_applies_clamp() {
        let source = |team: &TeamId, _: &TeamId, _: NaiveDate| {
            Some(if team.as_str() == "India" { 0.99 } else { 0.01 })
        };
        let options = CacheOptions { clamp: Some(CacheOptions::SERVICE_CLAMP) };

        let cache = ProbabilityCache::build(&roster(), as_of(), &source, &options).unwrap();
        assert_eq!(cache.get("India", "Nepal"), Some(0.95));
        assert_eq!(cache.get("Nepal", "India"), Some(0.05));
        assert_eq!(cache.range(), Some((0.05, 0.95)));
    }

    #[test]
    fn test_invalid_clamp_bounds() {
        let options = CacheOptions { clamp: Some((0.9, 0.1)) };
        assert!(matches!(options.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_compile_keeps_directions_independent() {
        let mut cache = ProbabilityCache::new();
        for (a, b) in roster().ordered_pairs() {
            cache.insert(a.clone(), b.clone(), 0.5);
        }
        cache.insert("India", "Nepal", 0.8);
        cache.insert("Nepal", "India", 0.4);

        let roster = roster();
        let matrix = cache.compile(&roster).unwrap();
        let india = roster.index_of("India").unwrap();
        let nepal = roster.index_of("Nepal").unwrap();

        assert_eq!(matrix.team_count(), 3);
        assert_eq!(matrix.get(india, nepal), 0.8);
        assert_eq!(matrix.get(nepal, india), 0.4);
    }

    #[test]
    fn test_compile_reports_missing_pair() {
        let mut cache = ProbabilityCache::new();
        for (a, b) in roster().ordered_pairs() {
            if !(a.as_str() == "USA" && b.as_str() == "India") {
                cache.insert(a.clone(), b.clone(), 0.5);
            }
        }

        let err = cache.compile(&roster()).unwrap_err();
        assert_eq!(
            err,
            SimError::IncompleteCoverage { team: "USA".to_string(), opponent: "India".to_string() }
        );
    }

    #[test]
    fn test_compile_rejects_nan() {
        let mut cache = ProbabilityCache::new();
        for (a, b) in roster().ordered_pairs() {
            cache.insert(a.clone(), b.clone(), f64::NAN);
        }
        assert!(matches!(cache.compile(&roster()), Err(SimError::InvalidProbability { .. })));
    }

    #[test]
    fn test_entries_sorted() {
        let cache: ProbabilityCache = vec![
            ProbabilityEntry { team_a: "USA".into(), team_b: "India".into(), prob: 0.2 },
            ProbabilityEntry { team_a: "India".into(), team_b: "USA".into(), prob: 0.8 },
        ]
        .into_iter()
        .collect();

        let entries = cache.entries();
        assert_eq!(entries[0].team_a.as_str(), "India");
        assert_eq!(entries[1].prob, 0.2);
    }
}
