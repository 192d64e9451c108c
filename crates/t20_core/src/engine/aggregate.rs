//! Accumulates trial outcomes into per-team odds.

use super::trial::{Milestone, TrialOutcome};
use crate::models::{Roster, TeamId, TeamIdx};
use serde::{Deserialize, Serialize};

/// Per-team milestone counters. Workers keep one each and [`Tally::merge`]
/// them at the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    counts: Vec<[u64; 4]>,
    trials: u64,
}

impl Tally {
    pub fn new(team_count: usize) -> Self {
        Self { counts: vec![[0; 4]; team_count], trials: 0 }
    }

    pub fn record(&mut self, outcome: &TrialOutcome) {
        for event in &outcome.events {
            self.counts[event.team][event.milestone.index()] += 1;
        }
        self.trials += 1;
    }

    pub fn merge(mut self, other: Tally) -> Tally {
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            for (m, t) in mine.iter_mut().zip(theirs) {
                *m += t;
            }
        }
        self.trials += other.trials;
        self
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn count(&self, team: TeamIdx, milestone: Milestone) -> u64 {
        self.counts[team][milestone.index()]
    }

    /// Percentages over `n_sims` trials, best champion odds first; ties keep
    /// roster order.
    pub fn into_odds(self, roster: &Roster, n_sims: u64) -> Vec<TeamOdds> {
        let pct = |count: u64| count as f64 / n_sims as f64 * 100.0;

        let mut odds: Vec<TeamOdds> = roster
            .iter()
            .enumerate()
            .map(|(idx, team)| {
                let c = &self.counts[idx];
                TeamOdds {
                    team: team.clone(),
                    champion_pct: pct(c[Milestone::Champion.index()]),
                    finalist_pct: pct(c[Milestone::Final.index()]),
                    semifinalist_pct: pct(c[Milestone::Semifinal.index()]),
                    super8_pct: pct(c[Milestone::Super8.index()]),
                }
            })
            .collect();

        odds.sort_by(|a, b| b.champion_pct.total_cmp(&a.champion_pct));
        odds
    }
}

/// One row of the results table. Field names on the wire match the
/// service's `win_pct` / `final_pct` / `semi_pct` / `super8_pct` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamOdds {
    pub team: TeamId,
    #[serde(rename = "win_pct")]
    pub champion_pct: f64,
    #[serde(rename = "final_pct")]
    pub finalist_pct: f64,
    #[serde(rename = "semi_pct")]
    pub semifinalist_pct: f64,
    pub super8_pct: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::trial::OutcomeEvent;

    fn outcome(events: &[(TeamIdx, Milestone)]) -> TrialOutcome {
        TrialOutcome {
            events: events.iter().map(|&(team, milestone)| OutcomeEvent { team, milestone }).collect(),
        }
    }

    #[test]
    fn test_record_and_merge() {
        let mut a = Tally::new(3);
        a.record(&outcome(&[(0, Milestone::Super8), (0, Milestone::Champion)]));
        let mut b = Tally::new(3);
        b.record(&outcome(&[(0, Milestone::Super8), (2, Milestone::Champion)]));
        b.record(&outcome(&[(1, Milestone::Final)]));

        let merged = a.merge(b);
        assert_eq!(merged.trials(), 3);
        assert_eq!(merged.count(0, Milestone::Super8), 2);
        assert_eq!(merged.count(0, Milestone::Champion), 1);
        assert_eq!(merged.count(2, Milestone::Champion), 1);
        assert_eq!(merged.count(1, Milestone::Final), 1);
    }

    #[test]
    fn test_into_odds_sorted_with_stable_ties() {
        let roster = Roster::new(["Canada", "India", "Nepal", "Oman"].map(TeamId::from));
        let mut tally = Tally::new(4);
        tally.record(&outcome(&[(2, Milestone::Champion), (2, Milestone::Super8)]));
        tally.record(&outcome(&[(2, Milestone::Champion)]));
        tally.record(&outcome(&[(3, Milestone::Champion)]));
        tally.record(&outcome(&[(1, Milestone::Champion)]));

        let odds = tally.into_odds(&roster, 4);
        let order: Vec<&str> = odds.iter().map(|o| o.team.as_str()).collect();

        assert_eq!(order, vec!["Nepal", "India", "Oman", "Canada"]);
        assert_eq!(odds[0].champion_pct, 50.0);
        assert_eq!(odds[0].super8_pct, 25.0);
        assert_eq!(odds[3].champion_pct, 0.0);
    }

    #[test]
    fn test_into_odds_without_champions_keeps_roster_order() {
        let roster = Roster::new(["Italy", "Canada", "Nepal"].map(TeamId::from));
        let mut tally = Tally::new(3);
        tally.record(&outcome(&[(2, Milestone::Super8)]));

        let odds = tally.into_odds(&roster, 1);
        let order: Vec<&str> = odds.iter().map(|o| o.team.as_str()).collect();

        assert_eq!(order, vec!["Canada", "Italy", "Nepal"]);
        assert!(odds.iter().all(|o| o.champion_pct == 0.0));
        assert_eq!(odds[2].super8_pct, 100.0);
    }

    #[test]
    fn test_team_odds_wire_names() {
        let row = TeamOdds {
            team: "India".into(),
            champion_pct: 30.0,
            finalist_pct: 45.0,
            semifinalist_pct: 60.0,
            super8_pct: 90.0,
        };
        let value = serde_json::to_value(&row).unwrap();

        assert_eq!(value["team"], "India");
        assert_eq!(value["win_pct"], 30.0);
        assert_eq!(value["final_pct"], 45.0);
        assert_eq!(value["semi_pct"], 60.0);
        assert_eq!(value["super8_pct"], 90.0);
    }
}
