//! Property tests over randomly shaped tournaments.

use crate::engine::{play_round_robin, MarginModel, MatchResolver, SimConfig, POINTS_PER_WIN};
use crate::engine::simulate_tournament;
use crate::models::{Roster, Topology};
use crate::probability::ProbabilityCache;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

const GROUP_NAMES: [&str; 4] = ["A", "B", "C", "D"];

/// Groups of the given sizes; rank 1 and rank 2 of each group alternate
/// between Super-8 groups S1 and S2.
fn topology_for(sizes: &[usize]) -> Topology {
    let mut groups = serde_json::Map::new();
    let mut s1 = Vec::new();
    let mut s2 = Vec::new();

    for (i, &size) in sizes.iter().enumerate() {
        let name = GROUP_NAMES[i];
        let teams: Vec<String> = (0..size).map(|t| format!("Team {name}{t}")).collect();
        groups.insert(name.to_string(), json!(teams));

        let (first, second) = if i % 2 == 0 { (&mut s1, &mut s2) } else { (&mut s2, &mut s1) };
        first.push(format!("{name}1"));
        second.push(format!("{name}2"));
    }

    let value = json!({
        "groups": groups,
        "super8": { "groups": { "S1": s1, "S2": s2 } },
        "knockout": { "semi_finals": [["S1_1", "S2_2"], ["S2_1", "S1_2"]] }
    });
    serde_json::from_value(value).expect("generated topology should parse")
}

fn cache_from(roster: &Roster, probs: &[f64]) -> ProbabilityCache {
    let mut cache = ProbabilityCache::new();
    for ((a, b), &p) in roster.ordered_pairs().zip(probs.iter().cycle()) {
        cache.insert(a.clone(), b.clone(), p);
    }
    cache
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Property: every team's odds are nested and bounded; exactly one champion per trial
    #[test]
    fn prop_odds_nested_and_normalised(
        sizes in prop::collection::vec(2usize..=5, 2..=4),
        probs in prop::collection::vec(0.0f64..=1.0, 1..64),
        n_sims in 1u32..60,
        seed in any::<u64>(),
    ) {
        let topology = topology_for(&sizes);
        let cache = cache_from(&topology.roster(), &probs);
        let config = SimConfig::default().with_n_sims(n_sims).with_seed(seed);

        let report = simulate_tournament(&topology, &cache, config).unwrap();

        let champions: f64 = report.results.iter().map(|r| r.champion_pct).sum();
        prop_assert!((champions - 100.0).abs() < 1e-9);

        for row in &report.results {
            prop_assert!(row.champion_pct >= 0.0);
            prop_assert!(row.champion_pct <= row.finalist_pct);
            prop_assert!(row.finalist_pct <= row.semifinalist_pct);
            prop_assert!(row.semifinalist_pct <= row.super8_pct);
            prop_assert!(row.super8_pct <= 100.0);
        }
    }

    /// Property: a seed fully determines the output, regardless of scheduling
    #[test]
    fn prop_seed_determines_output(
        sizes in prop::collection::vec(2usize..=5, 2..=4),
        probs in prop::collection::vec(0.0f64..=1.0, 1..64),
        seed in any::<u64>(),
    ) {
        let topology = topology_for(&sizes);
        let cache = cache_from(&topology.roster(), &probs);
        let config = SimConfig::default().with_n_sims(40).with_seed(seed);

        let parallel = simulate_tournament(&topology, &cache, config.clone()).unwrap();
        let sequential = simulate_tournament(&topology, &cache, config.sequential()).unwrap();
        prop_assert_eq!(parallel, sequential);
    }

    /// Property: a round robin of k teams plays k(k-1)/2 matches worth 2 points each
    #[test]
    fn prop_round_robin_conserves_points(
        k in 2usize..=8,
        probs in prop::collection::vec(0.0f64..=1.0, 1..64),
        seed in any::<u64>(),
    ) {
        let roster = Roster::new((0..k).map(|i| format!("Team {i}").into()));
        let matrix = cache_from(&roster, &probs).compile(&roster).unwrap();
        let margin = MarginModel::default();
        let resolver = MatchResolver::new(&matrix, &margin);
        let teams: Vec<usize> = (0..k).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let table = play_round_robin(&teams, &resolver, &mut rng).unwrap();

        let matches = k * (k - 1) / 2;
        prop_assert_eq!(table.matches_played, matches);
        prop_assert_eq!(table.total_points(), POINTS_PER_WIN * matches as u32);
        let nrr: f64 = table.rows.iter().map(|r| r.net_run_rate).sum();
        prop_assert!(nrr.abs() < 1e-9);
    }
}
