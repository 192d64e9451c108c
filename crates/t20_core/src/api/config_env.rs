use crate::engine::SimConfig;
use std::{env, fs};

pub const SIM_CONFIG_PATH_ENV: &str = "T20_SIM_CONFIG_PATH";

/// Base config for API calls: the JSON file named by `T20_SIM_CONFIG_PATH`,
/// or defaults when the variable is unset or blank.
pub fn sim_config_from_env() -> Result<SimConfig, String> {
    let Ok(path) = env::var(SIM_CONFIG_PATH_ENV) else {
        return Ok(SimConfig::default());
    };

    let path = path.trim();
    if path.is_empty() {
        return Ok(SimConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read sim config file from {SIM_CONFIG_PATH_ENV}='{path}': {e}"))?;

    let config = SimConfig::from_json(&content)
        .map_err(|e| format!("Failed to parse sim config JSON from {SIM_CONFIG_PATH_ENV}='{path}': {e}"))?;

    config
        .validate()
        .map_err(|e| format!("Invalid sim config from {SIM_CONFIG_PATH_ENV}='{path}': {e}"))?;

    Ok(config)
}
