//! JSON entry point mirroring the service's `/simulate` operation.
//!
//! Request:
//! ```json
//! { "config": { "groups": { ... }, "super8": { ... }, "knockout": { ... } },
//!   "n_sims": 10000, "seed": 42 }
//! ```
//! Response: `{ "tournament", "n_sims", "seed", "results": [{ "team",
//! "win_pct", "final_pct", "semi_pct", "super8_pct" }] }`.

use super::config_env::sim_config_from_env;
use crate::engine::{SimConfig, SimulationReport, TournamentSimulator, DEFAULT_N_SIMS};
use crate::error::SimError;
use crate::models::Topology;
use crate::probability::ProbabilityCache;
use serde::Deserialize;
use validator::Validate;

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

fn sim_err(err: SimError) -> String {
    err_code(err.code(), err)
}

fn default_n_sims() -> u32 {
    DEFAULT_N_SIMS
}

#[derive(Debug, Deserialize, Validate)]
pub struct SimulationRequest {
    /// Tournament topology
    pub config: Topology,
    #[serde(default = "default_n_sims")]
    #[validate(range(min = 1, max = 10000000))]
    pub n_sims: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

pub type SimulationResponse = SimulationReport;

/// Run a simulation described by `request_json` against `cache`.
///
/// Run parameters not carried by the request (execution mode, margin model)
/// come from [`SimConfig`] defaults, or from the file named by
/// `T20_SIM_CONFIG_PATH` when set.
pub fn simulate_tournament_json(request_json: &str, cache: &ProbabilityCache) -> Result<String, String> {
    let request: SimulationRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code("E_INVALID_REQUEST", format!("Invalid JSON request: {e}")))?;

    request
        .validate()
        .map_err(|e| err_code("E_INVALID_REQUEST", format!("Invalid request: {e}")))?;

    let mut config = sim_config_from_env().map_err(|e| err_code("E_INVALID_CONFIG", e))?;
    config.n_sims = request.n_sims;
    if request.seed.is_some() {
        config.seed = request.seed;
    }

    let response = run(&request.config, cache, config).map_err(sim_err)?;

    serde_json::to_string(&response)
        .map_err(|e| err_code("E_SERIALIZATION", format!("Failed to serialize response: {e}")))
}

fn run(topology: &Topology, cache: &ProbabilityCache, config: SimConfig) -> Result<SimulationResponse, SimError> {
    TournamentSimulator::new(topology, cache, config)?.run()
}
