pub mod json_api;

mod config_env;

pub use config_env::{sim_config_from_env, SIM_CONFIG_PATH_ENV};
pub use json_api::{simulate_tournament_json, SimulationRequest, SimulationResponse};
