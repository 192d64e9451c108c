use thiserror::Error;

/// Fatal errors raised while preparing or running a tournament simulation.
///
/// None of these are retried: they all describe a defect in the topology,
/// the probability table, or the run parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Malformed topology: {0}")]
    MalformedTopology(String),

    #[error("Incomplete probability coverage: no entry for ({team}, {opponent})")]
    IncompleteCoverage { team: String, opponent: String },

    #[error("Slot {slot} out of range: only {available} team(s) ranked")]
    SlotOutOfRange { slot: String, available: usize },

    #[error("Invalid probability {value} for ({team}, {opponent}): must be within [0, 1]")]
    InvalidProbability { team: String, opponent: String, value: f64 },

    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("Simulation cancelled after {completed} trial(s)")]
    Cancelled { completed: u64 },
}

impl SimError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        SimError::MalformedTopology(msg.into())
    }

    /// Stable machine-readable code, used as the prefix of JSON API errors.
    pub fn code(&self) -> &'static str {
        match self {
            SimError::MalformedTopology(_) => "E_MALFORMED_TOPOLOGY",
            SimError::IncompleteCoverage { .. } => "E_INCOMPLETE_COVERAGE",
            SimError::SlotOutOfRange { .. } => "E_SLOT_OUT_OF_RANGE",
            SimError::InvalidProbability { .. } => "E_INVALID_PROBABILITY",
            SimError::InvalidConfig(_) => "E_INVALID_CONFIG",
            SimError::Cancelled { .. } => "E_CANCELLED",
        }
    }

    /// True when the error points at bad input data rather than at the run
    /// being interrupted.
    pub fn is_configuration_defect(&self) -> bool {
        !matches!(self, SimError::Cancelled { .. })
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
