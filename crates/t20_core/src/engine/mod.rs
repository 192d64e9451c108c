//! Bracket simulation engine.
//!
//! Leaves first: [`match_resolver`] decides single matches, [`stage`] runs
//! round robins, [`slot_resolver`] maps qualification slots to teams,
//! [`trial`] drives one full tournament over a compiled [`bracket`],
//! [`aggregate`] turns trials into odds and [`runner`] schedules the trials.

pub mod aggregate;
pub mod bracket;
pub mod config;
pub mod match_resolver;
pub mod runner;
pub mod slot_resolver;
pub mod stage;
pub mod trial;

pub use aggregate::{Tally, TeamOdds};
pub use bracket::{Bracket, CompiledGroup, CompiledSuper8Group, QUALIFIERS_PER_GROUP};
pub use config::{Execution, MarginModel, SimConfig, DEFAULT_N_SIMS};
pub use match_resolver::{draw_winner, margin_proxy, MatchOutcome, MatchResolver};
pub use runner::{simulate_tournament, trial_rng, CancelFlag, SimulationReport, TournamentSimulator};
pub use slot_resolver::{resolve_slot, CompiledSlot, StageStandings};
pub use stage::{play_round_robin, StageTable, StandingRow, POINTS_PER_WIN};
pub use trial::{run_trial, Milestone, OutcomeEvent, Phase, TrialOutcome};
