//! Shared fixtures for unit tests.

use crate::models::{Roster, TeamId, Topology};
use crate::probability::ProbabilityCache;

pub(crate) const WC_TOPOLOGY_JSON: &str = include_str!("../fixtures/t20wc2026_topology.json");

pub(crate) fn topology_from_json(json: &str) -> Topology {
    Topology::from_json(json).expect("test topology should parse")
}

/// 20 teams, four groups of five, two Super-8 groups of four.
pub(crate) fn wc_topology() -> Topology {
    topology_from_json(WC_TOPOLOGY_JSON)
}

/// Two groups of three, one Super-8 group fed by the top two of each.
pub(crate) fn mini_topology() -> Topology {
    topology_from_json(
        r#"{
            "tournament": "Mini Cup",
            "groups": {
                "A": ["India", "Nepal", "Canada"],
                "B": ["England", "Oman", "Italy"]
            },
            "super8": { "groups": { "S1": ["A1", "B1", "A2", "B2"] } },
            "knockout": { "semi_finals": [["S1_1", "S1_4"], ["S1_2", "S1_3"]] }
        }"#,
    )
}

/// Every ordered pair at probability `p`.
pub(crate) fn flat_cache(roster: &Roster, p: f64) -> ProbabilityCache {
    let mut cache = ProbabilityCache::new();
    for (a, b) in roster.ordered_pairs() {
        cache.insert(a.clone(), b.clone(), p);
    }
    cache
}

/// `team` beats everyone with certainty; other pairs are coin flips.
pub(crate) fn dominant_cache(roster: &Roster, team: &str) -> ProbabilityCache {
    let mut cache = flat_cache(roster, 0.5);
    for other in roster.iter().filter(|t| t.as_str() != team) {
        cache.insert(TeamId::from(team), other.clone(), 1.0);
        cache.insert(other.clone(), TeamId::from(team), 0.0);
    }
    cache
}

/// Elo-style ladder over roster order: index 0 strongest, 60 points apart.
pub(crate) fn skewed_cache(roster: &Roster) -> ProbabilityCache {
    let rating = |team: &TeamId| 2000.0 - 60.0 * roster.index_of(team.as_str()).unwrap_or(0) as f64;
    let mut cache = ProbabilityCache::new();
    for (a, b) in roster.ordered_pairs() {
        let p = 1.0 / (1.0 + 10f64.powf((rating(b) - rating(a)) / 400.0));
        cache.insert(a.clone(), b.clone(), p);
    }
    cache
}
