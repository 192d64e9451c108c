//! # t20_core - Deterministic T20 Tournament Outcome Simulator
//!
//! Estimates each team's odds of reaching the Super 8, the semifinals and
//! the final, and of winning the tournament, by simulating the whole bracket
//! many times against a precomputed win-probability table.
//!
//! ## Features
//! - Group stage and Super 8 round robins with points / net-run-rate ranking
//! - Slot-based qualification (`"A1"`, `"S1_2"`) validated once up front
//! - 100% deterministic for a seed, sequential or parallel (rayon)
//! - JSON API matching the service's `/simulate` shape
//!
//! ```rust
//! use t20_core::{simulate_tournament, ProbabilityCache, SimConfig, Topology};
//!
//! let topology = Topology::from_json(r#"{
//!     "groups": { "A": ["India", "Nepal"], "B": ["England", "Oman"] },
//!     "super8": { "groups": { "S1": ["A1", "B2"], "S2": ["B1", "A2"] } },
//!     "knockout": { "semi_finals": [["S1_1", "S2_2"], ["S2_1", "S1_2"]] }
//! }"#).unwrap();
//!
//! let mut cache = ProbabilityCache::new();
//! for (a, b) in topology.roster().ordered_pairs() {
//!     cache.insert(a.clone(), b.clone(), 0.5);
//! }
//!
//! let report = simulate_tournament(&topology, &cache, SimConfig::default().with_seed(7)).unwrap();
//! assert_eq!(report.results.len(), 4);
//! ```

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod probability;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod proptests;

pub use api::{
    sim_config_from_env, simulate_tournament_json, SimulationRequest, SimulationResponse,
    SIM_CONFIG_PATH_ENV,
};
pub use engine::{
    simulate_tournament, CancelFlag, Execution, MarginModel, SimConfig, SimulationReport, TeamOdds,
    TournamentSimulator,
};
pub use error::{Result, SimError};
pub use models::{Roster, SlotRef, TeamId, Topology};
pub use probability::{
    CacheOptions, ProbabilityCache, ProbabilityEntry, ProbabilitySource, TableSource,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
