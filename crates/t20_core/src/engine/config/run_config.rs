//! Run parameters for a simulation.

use super::margin_config::MarginModel;
use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_N_SIMS: u32 = 10_000;

/// How trials are scheduled. Both modes give identical results for a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Execution {
    Sequential,
    #[default]
    Parallel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of trials; also the percentage denominator
    pub n_sims: u32,
    /// Base seed. Trial `i` uses `seed + i`. Drawn at random when absent.
    pub seed: Option<u64>,
    pub execution: Execution,
    pub margin: MarginModel,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            n_sims: DEFAULT_N_SIMS,
            seed: None,
            execution: Execution::default(),
            margin: MarginModel::default(),
        }
    }
}

impl SimConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_n_sims(mut self, n_sims: u32) -> Self {
        self.n_sims = n_sims;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.execution = Execution::Sequential;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SimError::InvalidConfig(format!("invalid config JSON: {e}")))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| SimError::InvalidConfig(format!("invalid config YAML: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_sims == 0 {
            return Err(SimError::InvalidConfig("n_sims must be >= 1".to_string()));
        }
        self.margin.validate()
    }
}
