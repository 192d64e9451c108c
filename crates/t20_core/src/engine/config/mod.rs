//! # Engine Configuration
//!
//! Tuning constants and run parameters, all serde-loadable with defaults.
//!
//! ```rust
//! use t20_core::engine::config::{MarginModel, SimConfig};
//!
//! let config = SimConfig::default().with_seed(42).with_n_sims(1_000);
//! assert_eq!(config.margin, MarginModel::default());
//! ```

mod margin_config;
mod run_config;

pub use margin_config::MarginModel;
pub use run_config::{Execution, SimConfig, DEFAULT_N_SIMS};
