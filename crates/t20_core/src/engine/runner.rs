//! Monte Carlo driver: compiles inputs once, runs the trials, aggregates.
//!
//! Trial `i` draws from its own `ChaCha8Rng` seeded with `seed + i`, so the
//! output for a seed is the same whether trials run on one thread or many.

use super::aggregate::{Tally, TeamOdds};
use super::bracket::Bracket;
use super::config::{Execution, SimConfig};
use super::match_resolver::MatchResolver;
use super::trial::run_trial;
use crate::error::{Result, SimError};
use crate::models::Topology;
use crate::probability::{ProbabilityCache, ProbabilityMatrix};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Shared flag for stopping a run between trials.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub tournament: String,
    pub n_sims: u32,
    /// Base seed actually used; pass it back in to reproduce the run.
    pub seed: u64,
    pub results: Vec<TeamOdds>,
}

/// Generator for trial `trial` of a run seeded with `base_seed`.
pub fn trial_rng(base_seed: u64, trial: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(trial))
}

/// A validated, ready-to-run simulation.
///
/// Construction performs every up-front check (topology shape, probability
/// coverage and range, config values), so no trial runs on bad input.
#[derive(Debug, Clone)]
pub struct TournamentSimulator {
    bracket: Bracket,
    matrix: ProbabilityMatrix,
    config: SimConfig,
}

impl TournamentSimulator {
    pub fn new(topology: &Topology, cache: &ProbabilityCache, config: SimConfig) -> Result<Self> {
        config.validate()?;
        let bracket = Bracket::compile(topology)?;
        let matrix = cache.compile(&bracket.roster)?;
        Ok(Self { bracket, matrix, config })
    }

    pub fn bracket(&self) -> &Bracket {
        &self.bracket
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn run(&self) -> Result<SimulationReport> {
        self.run_with_cancel(&CancelFlag::new())
    }

    pub fn run_with_cancel(&self, cancel: &CancelFlag) -> Result<SimulationReport> {
        let seed = self.config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let n_sims = self.config.n_sims;

        info!(
            tournament = %self.bracket.tournament,
            n_sims,
            seed,
            execution = ?self.config.execution,
            "simulation started"
        );
        let started = Instant::now();

        let tally = match self.config.execution {
            Execution::Sequential => self.run_sequential(seed, cancel)?,
            Execution::Parallel => self.run_parallel(seed, cancel)?,
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!(trials = tally.trials(), elapsed_ms, "simulation finished");

        Ok(SimulationReport {
            tournament: self.bracket.tournament.clone(),
            n_sims,
            seed,
            results: tally.into_odds(&self.bracket.roster, u64::from(n_sims)),
        })
    }

    fn run_sequential(&self, seed: u64, cancel: &CancelFlag) -> Result<Tally> {
        let resolver = MatchResolver::new(&self.matrix, &self.config.margin);
        let mut tally = Tally::new(self.bracket.roster.len());

        for trial in 0..u64::from(self.config.n_sims) {
            if cancel.is_cancelled() {
                return Err(SimError::Cancelled { completed: trial });
            }
            let mut rng = trial_rng(seed, trial);
            let outcome = run_trial(&self.bracket, &resolver, &mut rng)?;
            tally.record(&outcome);
        }

        Ok(tally)
    }

    fn run_parallel(&self, seed: u64, cancel: &CancelFlag) -> Result<Tally> {
        let resolver = MatchResolver::new(&self.matrix, &self.config.margin);
        let team_count = self.bracket.roster.len();
        let completed = AtomicU64::new(0);

        debug!(threads = rayon::current_num_threads(), "dispatching trials");

        (0..u64::from(self.config.n_sims))
            .into_par_iter()
            .try_fold(
                || Tally::new(team_count),
                |mut tally, trial| {
                    if cancel.is_cancelled() {
                        return Err(SimError::Cancelled {
                            completed: completed.load(Ordering::Relaxed),
                        });
                    }
                    let mut rng = trial_rng(seed, trial);
                    let outcome = run_trial(&self.bracket, &resolver, &mut rng)?;
                    tally.record(&outcome);
                    completed.fetch_add(1, Ordering::Relaxed);
                    Ok(tally)
                },
            )
            .try_reduce(|| Tally::new(team_count), |a, b| Ok(a.merge(b)))
    }
}

/// Compile, validate and run in one call.
pub fn simulate_tournament(
    topology: &Topology,
    cache: &ProbabilityCache,
    config: SimConfig,
) -> Result<SimulationReport> {
    TournamentSimulator::new(topology, cache, config)?.run()
}
